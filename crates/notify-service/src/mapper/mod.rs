//! Event-to-notification mapper.
//!
//! One module per event family, each an independent processor with the
//! same shape: inspect the family's snapshot slice, gate on preferences,
//! check the dedup store, and emit records through [`SyncContext::emit`].
//! Processors never fail a batch: a malformed event is logged and skipped.
//!
//! The pipeline runs the families in a fixed order. Ordering only affects
//! the relative position of same-instant records in the inbox, not
//! correctness — every family is independent.

pub mod categories;
pub mod circles;
pub mod context;
pub mod format;
pub mod goals;
pub mod referrals;
pub mod reputation;
pub mod transactions;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use notify_core::events::EventSnapshot;

pub use context::SyncContext;

/// Per-family creation counts for one mapper run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the run was gated off entirely by the master switch.
    pub gated: bool,
    /// Notifications created from circle snapshots.
    pub circles: usize,
    /// Notifications created from goal snapshots.
    pub goals: usize,
    /// Notifications created from transactions.
    pub transactions: usize,
    /// Notifications created from reputation history.
    pub reputation: usize,
    /// Notifications created from category changes.
    pub categories: usize,
    /// Notifications created from referral rewards.
    pub referrals: usize,
}

impl SyncReport {
    /// Total notifications created in this run.
    pub fn total(&self) -> usize {
        self.circles
            + self.goals
            + self.transactions
            + self.reputation
            + self.categories
            + self.referrals
    }
}

/// Run every family processor over the snapshot, in order.
///
/// Cancellation is honored between families: an interrupted run leaves
/// the stores consistent because each emitted record persists its dedup
/// key before the pipeline moves on, so a later re-run resumes cleanly.
pub async fn run(
    ctx: &SyncContext,
    snapshot: &EventSnapshot,
    cancel: &CancellationToken,
) -> SyncReport {
    let mut report = SyncReport::default();

    report.circles = circles::process(ctx, &snapshot.circles).await;
    if cancel.is_cancelled() {
        tracing::debug!(account = %ctx.account, "Sync cancelled mid-pipeline");
        return report;
    }

    report.goals = goals::process(ctx, &snapshot.goals).await;
    if cancel.is_cancelled() {
        return report;
    }

    report.transactions = transactions::process(ctx, &snapshot.transactions).await;
    if cancel.is_cancelled() {
        return report;
    }

    report.reputation = reputation::process(ctx, &snapshot.reputation).await;
    if cancel.is_cancelled() {
        return report;
    }

    report.categories = categories::process(ctx, &snapshot.category_changes).await;
    if cancel.is_cancelled() {
        return report;
    }

    report.referrals = referrals::process(ctx, &snapshot.referral_rewards).await;
    report
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tokio_util::sync::CancellationToken;

    use notify_core::events::{
        CategoryChangeEvent, CircleSnapshot, EventSnapshot, GoalSnapshot, Referee, ReferralReward,
        ReputationEvent, TransactionKind, TransactionRecord,
    };
    use notify_entity::preference::NotificationPreferences;

    use super::*;
    use crate::testing::context_at;

    fn rent_fund() -> CircleSnapshot {
        CircleSnapshot {
            circle_id: "7".to_string(),
            circle_name: Some("Rent Fund".to_string()),
            is_started: true,
            is_completed: false,
            current_round: None,
            has_contributed: false,
            contribution_amount: None,
        }
    }

    fn completed_goal() -> GoalSnapshot {
        GoalSnapshot {
            goal_id: "3".to_string(),
            goal_name: Some("Vacation".to_string()),
            is_active: false,
            current_amount: 500.0,
            goal_amount: 500.0,
            deadline: None,
        }
    }

    #[tokio::test]
    async fn test_circle_started_emitted_once() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            circles: vec![rent_fund()],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        let first = run(&ctx, &snapshot, &cancel).await;
        assert_eq!(first.circles, 1);

        let records = notifications.all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Circle Started");
        assert!(records[0].message.contains("Rent Fund"));
        assert_eq!(records[0].priority, "high");

        // Observing isStarted again, any number of times, adds nothing.
        for _ in 0..3 {
            let again = run(&ctx, &snapshot, &cancel).await;
            assert_eq!(again.total(), 0);
        }
        assert_eq!(notifications.all().len(), 1);
    }

    #[tokio::test]
    async fn test_full_snapshot_idempotent() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            circles: vec![rent_fund()],
            goals: vec![completed_goal()],
            transactions: vec![TransactionRecord {
                id: "0xt1".to_string(),
                kind: TransactionKind::Payout,
                amount: 120.0,
                circle_name: Some("Rent Fund".to_string()),
                timestamp: now - Duration::hours(1),
            }],
            reputation: vec![ReputationEvent {
                id: "h1".to_string(),
                event_type: "contribution".to_string(),
                points_change: 5,
                reason: None,
            }],
            category_changes: vec![CategoryChangeEvent {
                id: "c1".to_string(),
                old_category: 1,
                new_category: 2,
            }],
            referral_rewards: vec![ReferralReward {
                id: "r1".to_string(),
                reward_amount: "2500000000000000000".to_string(),
                referee: Some(Referee {
                    username: Some("alice".to_string()),
                }),
            }],
        };
        let cancel = CancellationToken::new();

        let first = run(&ctx, &snapshot, &cancel).await;
        assert_eq!(first.total(), 6);
        let after_first = notifications.all().len();

        let second = run(&ctx, &snapshot, &cancel).await;
        assert_eq!(second.total(), 0);
        assert_eq!(notifications.all().len(), after_first);
    }

    #[tokio::test]
    async fn test_goal_completed_once_per_goal() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            goals: vec![completed_goal()],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.goals, 1);
        assert_eq!(run(&ctx, &snapshot, &cancel).await.goals, 0);

        let records = notifications.all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Goal Completed");
    }

    #[tokio::test]
    async fn test_active_goal_at_target_does_not_complete() {
        let now = Utc::now();
        let (ctx, _, _) = context_at(NotificationPreferences::default(), now);
        let mut goal = completed_goal();
        goal.is_active = true;
        let snapshot = EventSnapshot {
            goals: vec![goal],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.goals, 0);
    }

    #[tokio::test]
    async fn test_goal_reminder_fires_once_inside_final_week() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let goal = GoalSnapshot {
            goal_id: "9".to_string(),
            goal_name: Some("Laptop".to_string()),
            is_active: true,
            current_amount: 300.0,
            goal_amount: 400.0,
            deadline: Some(now + Duration::days(3)),
        };
        let snapshot = EventSnapshot {
            goals: vec![goal],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.goals, 1);
        // Re-checked daily: the 7-day key is consumed, no repeats.
        assert_eq!(run(&ctx, &snapshot, &cancel).await.goals, 0);
        assert_eq!(notifications.all().len(), 1);
    }

    #[tokio::test]
    async fn test_goal_reminder_outside_window() {
        let now = Utc::now();
        let (ctx, _, _) = context_at(NotificationPreferences::default(), now);
        let far = GoalSnapshot {
            goal_id: "10".to_string(),
            goal_name: None,
            is_active: true,
            current_amount: 0.0,
            goal_amount: 100.0,
            deadline: Some(now + Duration::days(30)),
        };
        let past = GoalSnapshot {
            goal_id: "11".to_string(),
            goal_name: None,
            is_active: true,
            current_amount: 0.0,
            goal_amount: 100.0,
            deadline: Some(now - Duration::days(1)),
        };
        let snapshot = EventSnapshot {
            goals: vec![far, past],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.goals, 0);
    }

    #[tokio::test]
    async fn test_transaction_window_boundary() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let at_boundary = TransactionRecord {
            id: "0xboundary".to_string(),
            kind: TransactionKind::Payout,
            amount: 50.0,
            circle_name: None,
            timestamp: now - Duration::hours(24),
        };
        let too_old = TransactionRecord {
            id: "0xold".to_string(),
            kind: TransactionKind::Payout,
            amount: 50.0,
            circle_name: None,
            timestamp: now - Duration::hours(24) - Duration::seconds(1),
        };
        let snapshot = EventSnapshot {
            transactions: vec![at_boundary, too_old],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        // Inclusive boundary: exactly 24h old is still in the window.
        assert_eq!(run(&ctx, &snapshot, &cancel).await.transactions, 1);
        let records = notifications.all();
        assert_eq!(records.len(), 1);
        assert!(records[0].message.contains("Unknown Circle"));
    }

    #[tokio::test]
    async fn test_disabled_category_consumes_no_key() {
        let now = Utc::now();
        let mut prefs = NotificationPreferences::default();
        prefs.circle_started = false;
        let (ctx, notifications, dedup) = context_at(prefs, now);
        let snapshot = EventSnapshot {
            circles: vec![rent_fund()],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.total(), 0);
        assert_eq!(dedup.len(), 0);

        // Re-enabling later still surfaces the event: the key was never
        // consumed while the flag was off.
        let enabled_ctx = SyncContext {
            prefs: NotificationPreferences::default(),
            ..ctx.clone()
        };
        assert_eq!(run(&enabled_ctx, &snapshot, &cancel).await.circles, 1);
        assert_eq!(notifications.all().len(), 1);
    }

    #[tokio::test]
    async fn test_referral_reward_formats_amount_and_referee() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            referral_rewards: vec![ReferralReward {
                id: "r1".to_string(),
                reward_amount: "2500000000000000000".to_string(),
                referee: Some(Referee {
                    username: Some("alice".to_string()),
                }),
            }],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.referrals, 1);
        let records = notifications.all();
        assert!(records[0].message.contains("$2.50"));
        assert!(records[0].message.contains("alice"));
    }

    #[tokio::test]
    async fn test_referral_reward_placeholder_referee() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            referral_rewards: vec![ReferralReward {
                id: "r2".to_string(),
                reward_amount: "not-a-number".to_string(),
                referee: None,
            }],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        // Malformed fields degrade, they never fail the batch.
        assert_eq!(run(&ctx, &snapshot, &cancel).await.referrals, 1);
        let records = notifications.all();
        assert!(records[0].message.contains("$0.00"));
        assert!(records[0].message.contains("A member"));
    }

    #[tokio::test]
    async fn test_category_promotion_and_sentinel() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            category_changes: vec![
                CategoryChangeEvent {
                    id: "c1".to_string(),
                    old_category: 1,
                    new_category: 3,
                },
                CategoryChangeEvent {
                    id: "c2".to_string(),
                    old_category: 3,
                    new_category: 99,
                },
            ],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.categories, 2);
        let records = notifications.all();
        let promotion = records.iter().find(|n| n.title == "Category Promoted").unwrap();
        assert!(promotion.message.contains("Gold"));
        let unmapped = records
            .iter()
            .find(|n| n.message.contains("Member"))
            .unwrap();
        assert_eq!(unmapped.title, "Category Promoted");
    }

    #[tokio::test]
    async fn test_reputation_direction_branches() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            reputation: vec![
                ReputationEvent {
                    id: "h1".to_string(),
                    event_type: "contribution".to_string(),
                    points_change: 10,
                    reason: None,
                },
                ReputationEvent {
                    id: "h2".to_string(),
                    event_type: "missed_payment".to_string(),
                    points_change: -15,
                    reason: Some("Missed round 2".to_string()),
                },
            ],
            ..EventSnapshot::default()
        };
        let cancel = CancellationToken::new();

        assert_eq!(run(&ctx, &snapshot, &cancel).await.reputation, 2);
        let records = notifications.all();
        let up = records
            .iter()
            .find(|n| n.title == "Reputation Increased")
            .unwrap();
        assert_eq!(up.priority, "low");
        let down = records
            .iter()
            .find(|n| n.title == "Reputation Decreased")
            .unwrap();
        assert_eq!(down.priority, "medium");
        assert!(down.message.contains("Missed round 2"));
    }

    #[tokio::test]
    async fn test_cancelled_run_resumes_cleanly() {
        let now = Utc::now();
        let (ctx, notifications, _) = context_at(NotificationPreferences::default(), now);
        let snapshot = EventSnapshot {
            circles: vec![rent_fund()],
            referral_rewards: vec![ReferralReward {
                id: "r1".to_string(),
                reward_amount: "1000000000000000000".to_string(),
                referee: None,
            }],
            ..EventSnapshot::default()
        };

        // Cancelled before the pipeline reaches referrals.
        let cancelled = CancellationToken::new();
        cancelled.cancel();
        let partial = run(&ctx, &snapshot, &cancelled).await;
        assert_eq!(partial.circles, 1);
        assert_eq!(partial.referrals, 0);

        // Resuming with the same snapshot emits only what was missed.
        let report = run(&ctx, &snapshot, &CancellationToken::new()).await;
        assert_eq!(report.circles, 0);
        assert_eq!(report.referrals, 1);
        assert_eq!(notifications.all().len(), 2);
    }
}
