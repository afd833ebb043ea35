//! Referral reward processor.

use tracing::warn;

use notify_core::events::ReferralReward;
use notify_entity::notification::model::Notification;
use notify_entity::notification::{NotificationType, Priority};
use notify_entity::{dedup, routes};

use super::context::SyncContext;
use super::format;

/// Placeholder for rewards missing a referee username.
const UNKNOWN_MEMBER: &str = "A member";

/// Map referral reward entries to notifications. Reward amounts arrive as
/// 10^18-scaled integer strings and display with two decimals.
pub async fn process(ctx: &SyncContext, rewards: &[ReferralReward]) -> usize {
    if !ctx.prefs.referral_reward {
        return 0;
    }

    let mut created = 0;

    for reward in rewards {
        let who = reward
            .referee
            .as_ref()
            .and_then(|r| r.username.clone())
            .unwrap_or_else(|| UNKNOWN_MEMBER.to_string());
        let amount = format::token_amount(&reward.reward_amount);

        let key = dedup::referral_reward(&reward.id);
        let notification = Notification::new(
            &ctx.account,
            NotificationType::ReferralReward,
            Priority::Medium,
            "Referral Reward",
            format!("You earned ${amount} for referring {who} to Circlepot!"),
        )
        .with_action(routes::action_for(NotificationType::ReferralReward));

        match ctx.emit(&key, notification).await {
            Ok(true) => created += 1,
            Ok(false) => {}
            Err(e) => warn!(reward_id = %reward.id, error = %e, "Referral reward emit failed"),
        }
    }

    created
}
