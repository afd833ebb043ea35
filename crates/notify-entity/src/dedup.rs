//! Dedup key builders for all notifiable occurrences.
//!
//! Centralising key construction prevents typos and keeps the foreground
//! pipeline and any future producer agreeing on what "already notified"
//! means. Keys are scoped per account by the store, so builders only
//! encode the event identity.
//!
//! These keys are permanent: a consumed key is never re-fired. This is a
//! deliberately different contract from the delivery channel's push `tag`,
//! which is last-write-wins.

use notify_core::events::TransactionKind;

/// Key for a circle entering the started state.
pub fn circle_started(circle_id: &str) -> String {
    format!("circle_started_{circle_id}")
}

/// Key for a contribution-due reminder. One per circle round, not per poll.
pub fn contribution_due(circle_id: &str, round: u32) -> String {
    format!("contribution_due_{circle_id}_{round}")
}

/// Key for a circle completing all rounds.
pub fn circle_completed(circle_id: &str) -> String {
    format!("circle_completed_{circle_id}")
}

/// Key for a goal reaching its target.
pub fn goal_completed(goal_id: &str) -> String {
    format!("goal_completed_{goal_id}")
}

/// Key for the single 7-day goal deadline reminder. Consumed once, the
/// reminder never repeats even when the deadline is re-checked daily.
pub fn goal_reminder_7days(goal_id: &str) -> String {
    format!("goal_reminder_{goal_id}_7days")
}

/// Key for a transaction notification, prefixed by transaction kind.
pub fn transaction(kind: TransactionKind, tx_id: &str) -> String {
    let prefix = match kind {
        TransactionKind::Payout => "payout",
        TransactionKind::LatePayment => "late_payment",
        TransactionKind::Contribution => "contribution",
    };
    format!("{prefix}_{tx_id}")
}

/// Key for a reputation history entry.
pub fn reputation(event_type: &str, id: &str) -> String {
    format!("rep_{event_type}_{id}")
}

/// Key for a membership category change entry.
pub fn category_change(id: &str) -> String {
    format!("cat_change_{id}")
}

/// Key for a referral reward entry.
pub fn referral_reward(id: &str) -> String {
    format!("ref_reward_{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_keys() {
        assert_eq!(circle_started("7"), "circle_started_7");
        assert_eq!(contribution_due("7", 3), "contribution_due_7_3");
        assert_eq!(circle_completed("7"), "circle_completed_7");
    }

    #[test]
    fn test_goal_keys() {
        assert_eq!(goal_completed("3"), "goal_completed_3");
        assert_eq!(goal_reminder_7days("3"), "goal_reminder_3_7days");
    }

    #[test]
    fn test_transaction_keys() {
        assert_eq!(transaction(TransactionKind::Payout, "0xt1"), "payout_0xt1");
        assert_eq!(
            transaction(TransactionKind::LatePayment, "0xt2"),
            "late_payment_0xt2"
        );
        assert_eq!(
            transaction(TransactionKind::Contribution, "0xt3"),
            "contribution_0xt3"
        );
    }

    #[test]
    fn test_history_keys() {
        assert_eq!(reputation("contribution", "h1"), "rep_contribution_h1");
        assert_eq!(category_change("c1"), "cat_change_c1");
        assert_eq!(referral_reward("r1"), "ref_reward_r1");
    }
}
