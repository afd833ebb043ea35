//! Circle lifecycle processor.

use tracing::warn;

use notify_core::events::CircleSnapshot;
use notify_entity::notification::model::Notification;
use notify_entity::notification::{NotificationType, Priority};
use notify_entity::{dedup, routes};

use super::context::SyncContext;
use super::format;

/// Placeholder for circles missing a display name.
const UNKNOWN_CIRCLE: &str = "Unknown Circle";

/// Map circle snapshots to lifecycle notifications.
pub async fn process(ctx: &SyncContext, circles: &[CircleSnapshot]) -> usize {
    let mut created = 0;

    for circle in circles {
        let name = circle
            .circle_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_CIRCLE.to_string());

        if ctx.prefs.circle_started && circle.is_started {
            let key = dedup::circle_started(&circle.circle_id);
            let notification = Notification::new(
                &ctx.account,
                NotificationType::CircleStarted,
                Priority::High,
                "Circle Started",
                format!("{name} has started! Contributions are now being collected."),
            )
            .with_action(routes::action_for(NotificationType::CircleStarted));

            match ctx.emit(&key, notification).await {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(e) => warn!(circle_id = %circle.circle_id, error = %e, "Circle started emit failed"),
            }
        }

        if ctx.prefs.contribution_due
            && circle.is_started
            && !circle.has_contributed
            && let Some(round) = circle.current_round
        {
            let key = dedup::contribution_due(&circle.circle_id, round);
            let message = match circle.contribution_amount {
                Some(amount) => format!(
                    "Your contribution of ${} for round {round} of {name} is due.",
                    format::usd(amount)
                ),
                None => format!("Your contribution for round {round} of {name} is due."),
            };
            let notification = Notification::new(
                &ctx.account,
                NotificationType::ContributionDue,
                Priority::High,
                "Contribution Due",
                message,
            )
            .with_action(routes::action_for(NotificationType::ContributionDue));

            match ctx.emit(&key, notification).await {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(e) => warn!(circle_id = %circle.circle_id, error = %e, "Contribution due emit failed"),
            }
        }

        if ctx.prefs.circle_completed && circle.is_completed {
            let key = dedup::circle_completed(&circle.circle_id);
            let notification = Notification::new(
                &ctx.account,
                NotificationType::CircleCompleted,
                Priority::Low,
                "Circle Completed",
                format!("{name} has completed all rounds. See your payout in the history."),
            )
            .with_action(routes::action_for(NotificationType::CircleCompleted));

            match ctx.emit(&key, notification).await {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(e) => warn!(circle_id = %circle.circle_id, error = %e, "Circle completed emit failed"),
            }
        }
    }

    created
}
