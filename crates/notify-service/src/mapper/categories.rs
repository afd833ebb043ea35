//! Membership category change processor.

use tracing::warn;

use notify_core::events::CategoryChangeEvent;
use notify_entity::notification::model::Notification;
use notify_entity::notification::{NotificationType, Priority};
use notify_entity::{dedup, routes};

use super::context::SyncContext;

/// Ordered membership tiers, indexed by the upstream category number.
const TIERS: [&str; 6] = ["Newcomer", "Bronze", "Silver", "Gold", "Platinum", "Diamond"];

/// Sentinel label for indices outside the tier list.
const UNMAPPED_TIER: &str = "Member";

/// Resolve a tier index to its display name.
pub fn tier_name(index: u32) -> &'static str {
    TIERS.get(index as usize).copied().unwrap_or(UNMAPPED_TIER)
}

/// Map category change entries to notifications. Moving to a higher tier
/// is a promotion with its own title; everything else is a generic change.
pub async fn process(ctx: &SyncContext, changes: &[CategoryChangeEvent]) -> usize {
    let mut created = 0;

    for change in changes {
        let tier = tier_name(change.new_category);

        let (enabled, kind, priority, title, message) = if change.is_promotion() {
            (
                ctx.prefs.category_promotion,
                NotificationType::CategoryPromotion,
                Priority::Medium,
                "Category Promoted",
                format!("Congratulations! You've been promoted to {tier}."),
            )
        } else {
            (
                ctx.prefs.category_changed,
                NotificationType::CategoryChanged,
                Priority::Low,
                "Category Updated",
                format!("Your membership category is now {tier}."),
            )
        };

        if !enabled {
            continue;
        }

        let key = dedup::category_change(&change.id);
        let notification = Notification::new(&ctx.account, kind, priority, title, message)
            .with_action(routes::action_for(kind));

        match ctx.emit(&key, notification).await {
            Ok(true) => created += 1,
            Ok(false) => {}
            Err(e) => warn!(change_id = %change.id, error = %e, "Category change emit failed"),
        }
    }

    created
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_name_mapping() {
        assert_eq!(tier_name(0), "Newcomer");
        assert_eq!(tier_name(5), "Diamond");
        assert_eq!(tier_name(17), "Member");
    }
}
