//! Transaction processor.

use chrono::Duration;
use tracing::warn;

use notify_core::events::{TransactionKind, TransactionRecord};
use notify_entity::notification::model::Notification;
use notify_entity::notification::{NotificationType, Priority};
use notify_entity::{dedup, routes};

use super::context::SyncContext;
use super::format;

/// Map recent transactions to financial notifications.
///
/// Only transactions inside the sliding window are considered — older
/// ones are assumed already processed or irrelevant and skipped without
/// consuming a key. The boundary is inclusive: a transaction exactly at
/// `now - window` is still in.
pub async fn process(ctx: &SyncContext, transactions: &[TransactionRecord]) -> usize {
    let cutoff = ctx.now - Duration::hours(ctx.transaction_window_hours);
    let mut created = 0;

    for tx in transactions {
        if tx.timestamp < cutoff {
            continue;
        }

        let circle = tx
            .circle_name
            .clone()
            .unwrap_or_else(|| "Unknown Circle".to_string());
        let amount = format::usd(tx.amount);

        let (enabled, kind, priority, title, message) = match tx.kind {
            TransactionKind::Payout => (
                ctx.prefs.payout_received,
                NotificationType::PayoutReceived,
                Priority::High,
                "Payout Received",
                format!("You received a payout of ${amount} from {circle}."),
            ),
            TransactionKind::LatePayment => (
                ctx.prefs.late_payment,
                NotificationType::LatePayment,
                Priority::Medium,
                "Late Payment",
                format!("A late payment of ${amount} was recorded for {circle}."),
            ),
            TransactionKind::Contribution => (
                ctx.prefs.contribution_confirmed,
                NotificationType::ContributionConfirmed,
                Priority::Medium,
                "Contribution Confirmed",
                format!("Your contribution of ${amount} to {circle} was confirmed."),
            ),
        };

        if !enabled {
            continue;
        }

        let key = dedup::transaction(tx.kind, &tx.id);
        let notification = Notification::new(&ctx.account, kind, priority, title, message)
            .with_action(routes::action_for(kind));

        match ctx.emit(&key, notification).await {
            Ok(true) => created += 1,
            Ok(false) => {}
            Err(e) => warn!(tx_id = %tx.id, error = %e, "Transaction emit failed"),
        }
    }

    created
}
