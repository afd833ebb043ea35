//! Reputation history processor.

use tracing::warn;

use notify_core::events::ReputationEvent;
use notify_entity::notification::model::Notification;
use notify_entity::notification::{NotificationType, Priority};
use notify_entity::{dedup, routes};

use super::context::SyncContext;

/// Map reputation history entries to notifications. Increases and
/// decreases carry different titles and priorities.
pub async fn process(ctx: &SyncContext, events: &[ReputationEvent]) -> usize {
    let mut created = 0;

    for event in events {
        let (enabled, kind, priority, title) = if event.is_increase() {
            (
                ctx.prefs.reputation_increase,
                NotificationType::ReputationIncrease,
                Priority::Low,
                "Reputation Increased",
            )
        } else {
            (
                ctx.prefs.reputation_decrease,
                NotificationType::ReputationDecrease,
                Priority::Medium,
                "Reputation Decreased",
            )
        };

        if !enabled {
            continue;
        }

        let delta = event.points_change.abs();
        let direction = if event.is_increase() { "up" } else { "down" };
        let message = match &event.reason {
            Some(reason) => {
                format!("Your reputation went {direction} by {delta} points: {reason}")
            }
            None => format!("Your reputation went {direction} by {delta} points."),
        };

        let key = dedup::reputation(&event.event_type, &event.id);
        let notification = Notification::new(&ctx.account, kind, priority, title, message)
            .with_action(routes::action_for(kind));

        match ctx.emit(&key, notification).await {
            Ok(true) => created += 1,
            Ok(false) => {}
            Err(e) => warn!(event_id = %event.id, error = %e, "Reputation emit failed"),
        }
    }

    created
}
