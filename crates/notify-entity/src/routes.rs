//! Fixed type-to-route table.
//!
//! Used by the mapper when creating notifications and by the startup
//! back-fill migration when repairing records persisted before actions
//! existed. The delivery channel resolves click targets from the same
//! routes, so this table is part of the shared-constants contract.

use crate::notification::action::NotificationAction;
use crate::notification::kind::{NotificationFamily, NotificationType};

/// Infer the canonical click-through action for a notification type.
pub fn action_for(kind: NotificationType) -> NotificationAction {
    match kind {
        NotificationType::CircleStarted
        | NotificationType::CircleRoundStarted
        | NotificationType::CircleMemberJoined
        | NotificationType::CircleMemberLeft
        | NotificationType::CircleLatePayment => NotificationAction::new("View Circle", "/circles"),
        NotificationType::ContributionDue => NotificationAction::new("Contribute", "/circles"),
        NotificationType::CircleInvite | NotificationType::CircleInviteAccepted => {
            NotificationAction::new("View Invites", "/circles/invites")
        }
        // Completed circles route to history: the circle itself is gone
        // from the active list.
        NotificationType::CircleCompleted
        | NotificationType::CirclePayoutSent
        | NotificationType::PayoutReceived
        | NotificationType::ContributionConfirmed
        | NotificationType::LatePayment
        | NotificationType::VaultYield => {
            NotificationAction::new("View History", "/transactions")
        }
        NotificationType::GoalCreated
        | NotificationType::GoalCompleted
        | NotificationType::GoalDeadlineReminder
        | NotificationType::GoalMilestone25
        | NotificationType::GoalMilestone50
        | NotificationType::GoalMilestone75
        | NotificationType::GoalContribution => NotificationAction::new("View Goal", "/goals"),
        NotificationType::ReputationIncrease
        | NotificationType::ReputationDecrease
        | NotificationType::CategoryPromotion
        | NotificationType::CategoryChanged => NotificationAction::new("View Profile", "/profile"),
        NotificationType::ReferralReward | NotificationType::ReferralJoined => {
            NotificationAction::new("View Referrals", "/referrals")
        }
        NotificationType::SystemAnnouncement
        | NotificationType::SecurityAlert
        | NotificationType::AppUpdate => NotificationAction::new("Open", "/"),
    }
}

/// Fallback route for a stored type string that no longer parses,
/// resolved by family conventions.
pub fn fallback_route(family: NotificationFamily) -> &'static str {
    match family {
        NotificationFamily::Circle => "/circles",
        NotificationFamily::Goal => "/goals",
        NotificationFamily::Financial => "/transactions",
        NotificationFamily::Social => "/profile",
        NotificationFamily::System => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_circle_routes_to_history() {
        let action = action_for(NotificationType::CircleCompleted);
        assert_eq!(action.route, "/transactions");
    }

    #[test]
    fn test_every_type_has_a_route() {
        for s in [
            "circle_started",
            "goal_completed",
            "referral_reward",
            "security_alert",
        ] {
            let kind = NotificationType::parse(s).unwrap();
            assert!(!action_for(kind).route.is_empty());
        }
    }
}
