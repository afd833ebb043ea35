//! Personal goal processor.

use tracing::warn;

use notify_core::events::GoalSnapshot;
use notify_entity::notification::model::Notification;
use notify_entity::notification::{NotificationType, Priority};
use notify_entity::{dedup, routes};

use super::context::SyncContext;
use super::format;

/// Placeholder for goals missing a display name.
const UNKNOWN_GOAL: &str = "Unknown Goal";

/// Map goal snapshots to completion and deadline notifications.
pub async fn process(ctx: &SyncContext, goals: &[GoalSnapshot]) -> usize {
    let mut created = 0;

    for goal in goals {
        let name = goal
            .goal_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_GOAL.to_string());

        // Completion is only reported once the goal has been deactivated
        // upstream, so an active goal at 100% does not fire early.
        if ctx.prefs.goal_completed
            && !goal.is_active
            && goal.goal_amount > 0.0
            && goal.current_amount >= goal.goal_amount
        {
            let key = dedup::goal_completed(&goal.goal_id);
            let notification = Notification::new(
                &ctx.account,
                NotificationType::GoalCompleted,
                Priority::Medium,
                "Goal Completed",
                format!(
                    "Congratulations! You reached your ${} target for {name}.",
                    format::usd(goal.goal_amount)
                ),
            )
            .with_action(routes::action_for(NotificationType::GoalCompleted));

            match ctx.emit(&key, notification).await {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(e) => warn!(goal_id = %goal.goal_id, error = %e, "Goal completed emit failed"),
            }
        }

        // One reminder inside the final week, never repeated: the 7-day
        // key is consumed on first emit even though the condition stays
        // true on every later poll.
        if ctx.prefs.goal_deadline_reminder
            && goal.is_active
            && let Some(deadline) = goal.deadline
        {
            let remaining = deadline.signed_duration_since(ctx.now);
            let days_left = remaining.num_days();
            if remaining > chrono::Duration::zero() && days_left <= 7 {
                let key = dedup::goal_reminder_7days(&goal.goal_id);
                let shortfall = (goal.goal_amount - goal.current_amount).max(0.0);
                let notification = Notification::new(
                    &ctx.account,
                    NotificationType::GoalDeadlineReminder,
                    Priority::Medium,
                    "Goal Deadline Approaching",
                    format!(
                        "{name} ends in {} day(s). You are ${} away from your target.",
                        days_left.max(1),
                        format::usd(shortfall)
                    ),
                )
                .with_action(routes::action_for(NotificationType::GoalDeadlineReminder));

                match ctx.emit(&key, notification).await {
                    Ok(true) => created += 1,
                    Ok(false) => {}
                    Err(e) => {
                        warn!(goal_id = %goal.goal_id, error = %e, "Goal reminder emit failed")
                    }
                }
            }
        }
    }

    created
}
