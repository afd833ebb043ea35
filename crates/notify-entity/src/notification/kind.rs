//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// Family grouping for notification types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFamily {
    /// Circle lifecycle notifications.
    Circle,
    /// Personal goal lifecycle notifications.
    Goal,
    /// Financial notifications (payouts, contributions, rewards).
    Financial,
    /// Social notifications (reputation, categories, referrals).
    Social,
    /// System-level notifications.
    System,
}

impl NotificationFamily {
    /// Return the family as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Goal => "goal",
            Self::Financial => "financial",
            Self::Social => "social",
            Self::System => "system",
        }
    }
}

/// Closed enumeration of everything the platform can notify about.
///
/// The string form (`as_str`) is the persisted representation and the
/// push `tag` vocabulary shared with the delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    // Circle lifecycle
    /// A circle started collecting contributions.
    CircleStarted,
    /// A circle finished all rounds.
    CircleCompleted,
    /// A contribution for the current round is due.
    ContributionDue,
    /// A new round opened.
    CircleRoundStarted,
    /// A member joined a circle.
    CircleMemberJoined,
    /// A member left a circle.
    CircleMemberLeft,
    /// The account was invited to a circle.
    CircleInvite,
    /// An invite sent by the account was accepted.
    CircleInviteAccepted,
    /// A payout was sent to another member.
    CirclePayoutSent,
    /// A member paid late.
    CircleLatePayment,

    // Goal lifecycle
    /// A goal was created.
    GoalCreated,
    /// A goal reached its target.
    GoalCompleted,
    /// A goal deadline is approaching.
    GoalDeadlineReminder,
    /// A goal crossed 25% of its target.
    GoalMilestone25,
    /// A goal crossed 50% of its target.
    GoalMilestone50,
    /// A goal crossed 75% of its target.
    GoalMilestone75,
    /// A scheduled goal contribution was made.
    GoalContribution,

    // Financial
    /// The account received a circle payout.
    PayoutReceived,
    /// A contribution was confirmed on-chain.
    ContributionConfirmed,
    /// The account contributed after the deadline.
    LatePayment,
    /// A referral reward was earned.
    ReferralReward,
    /// Vault yield was credited.
    VaultYield,

    // Social
    /// Reputation went up.
    ReputationIncrease,
    /// Reputation went down.
    ReputationDecrease,
    /// Membership category went up a tier.
    CategoryPromotion,
    /// Membership category changed.
    CategoryChanged,
    /// A referred user joined.
    ReferralJoined,

    // System
    /// Platform announcement.
    SystemAnnouncement,
    /// Security-relevant account event.
    SecurityAlert,
    /// A new app version is available.
    AppUpdate,
}

impl NotificationType {
    /// Return the type as its persisted snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CircleStarted => "circle_started",
            Self::CircleCompleted => "circle_completed",
            Self::ContributionDue => "contribution_due",
            Self::CircleRoundStarted => "circle_round_started",
            Self::CircleMemberJoined => "circle_member_joined",
            Self::CircleMemberLeft => "circle_member_left",
            Self::CircleInvite => "circle_invite",
            Self::CircleInviteAccepted => "circle_invite_accepted",
            Self::CirclePayoutSent => "circle_payout_sent",
            Self::CircleLatePayment => "circle_late_payment",
            Self::GoalCreated => "goal_created",
            Self::GoalCompleted => "goal_completed",
            Self::GoalDeadlineReminder => "goal_deadline_reminder",
            Self::GoalMilestone25 => "goal_milestone_25",
            Self::GoalMilestone50 => "goal_milestone_50",
            Self::GoalMilestone75 => "goal_milestone_75",
            Self::GoalContribution => "goal_contribution",
            Self::PayoutReceived => "payout_received",
            Self::ContributionConfirmed => "contribution_confirmed",
            Self::LatePayment => "late_payment",
            Self::ReferralReward => "referral_reward",
            Self::VaultYield => "vault_yield",
            Self::ReputationIncrease => "reputation_increase",
            Self::ReputationDecrease => "reputation_decrease",
            Self::CategoryPromotion => "category_promotion",
            Self::CategoryChanged => "category_changed",
            Self::ReferralJoined => "referral_joined",
            Self::SystemAnnouncement => "system_announcement",
            Self::SecurityAlert => "security_alert",
            Self::AppUpdate => "app_update",
        }
    }

    /// Parse the persisted string form. Returns `None` for unknown types
    /// so callers can degrade instead of failing a whole load.
    pub fn parse(s: &str) -> Option<Self> {
        let kind = match s {
            "circle_started" => Self::CircleStarted,
            "circle_completed" => Self::CircleCompleted,
            "contribution_due" => Self::ContributionDue,
            "circle_round_started" => Self::CircleRoundStarted,
            "circle_member_joined" => Self::CircleMemberJoined,
            "circle_member_left" => Self::CircleMemberLeft,
            "circle_invite" => Self::CircleInvite,
            "circle_invite_accepted" => Self::CircleInviteAccepted,
            "circle_payout_sent" => Self::CirclePayoutSent,
            "circle_late_payment" => Self::CircleLatePayment,
            "goal_created" => Self::GoalCreated,
            "goal_completed" => Self::GoalCompleted,
            "goal_deadline_reminder" => Self::GoalDeadlineReminder,
            "goal_milestone_25" => Self::GoalMilestone25,
            "goal_milestone_50" => Self::GoalMilestone50,
            "goal_milestone_75" => Self::GoalMilestone75,
            "goal_contribution" => Self::GoalContribution,
            "payout_received" => Self::PayoutReceived,
            "contribution_confirmed" => Self::ContributionConfirmed,
            "late_payment" => Self::LatePayment,
            "referral_reward" => Self::ReferralReward,
            "vault_yield" => Self::VaultYield,
            "reputation_increase" => Self::ReputationIncrease,
            "reputation_decrease" => Self::ReputationDecrease,
            "category_promotion" => Self::CategoryPromotion,
            "category_changed" => Self::CategoryChanged,
            "referral_joined" => Self::ReferralJoined,
            "system_announcement" => Self::SystemAnnouncement,
            "security_alert" => Self::SecurityAlert,
            "app_update" => Self::AppUpdate,
            _ => return None,
        };
        Some(kind)
    }

    /// The family this type belongs to.
    pub fn family(&self) -> NotificationFamily {
        match self {
            Self::CircleStarted
            | Self::CircleCompleted
            | Self::ContributionDue
            | Self::CircleRoundStarted
            | Self::CircleMemberJoined
            | Self::CircleMemberLeft
            | Self::CircleInvite
            | Self::CircleInviteAccepted
            | Self::CirclePayoutSent
            | Self::CircleLatePayment => NotificationFamily::Circle,
            Self::GoalCreated
            | Self::GoalCompleted
            | Self::GoalDeadlineReminder
            | Self::GoalMilestone25
            | Self::GoalMilestone50
            | Self::GoalMilestone75
            | Self::GoalContribution => NotificationFamily::Goal,
            Self::PayoutReceived
            | Self::ContributionConfirmed
            | Self::LatePayment
            | Self::ReferralReward
            | Self::VaultYield => NotificationFamily::Financial,
            Self::ReputationIncrease
            | Self::ReputationDecrease
            | Self::CategoryPromotion
            | Self::CategoryChanged
            | Self::ReferralJoined => NotificationFamily::Social,
            Self::SystemAnnouncement | Self::SecurityAlert | Self::AppUpdate => {
                NotificationFamily::System
            }
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_as_str() {
        for kind in [
            NotificationType::CircleStarted,
            NotificationType::GoalDeadlineReminder,
            NotificationType::ReferralReward,
            NotificationType::AppUpdate,
        ] {
            assert_eq!(NotificationType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(NotificationType::parse("totally_new_kind"), None);
    }
}
