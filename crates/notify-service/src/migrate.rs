//! Startup back-fill of click-through actions.
//!
//! Records persisted before actions existed are repaired in place by
//! inferring an action from their type via the fixed route table. The
//! pass is explicitly idempotent: a record that already has an action is
//! never touched, so running it on every startup is safe.

use tracing::{info, warn};

use notify_core::result::AppResult;
use notify_entity::routes;

use crate::store::NotificationStore;

/// Batch size per round.
const BATCH: i64 = 500;

/// Repair every stored record lacking an action. Returns how many were
/// repaired.
pub async fn backfill_actions(store: &dyn NotificationStore) -> AppResult<u64> {
    let mut repaired = 0u64;

    loop {
        let batch = store.find_missing_action(BATCH).await?;
        if batch.is_empty() {
            break;
        }

        let mut changed = 0u64;
        for record in &batch {
            let Some(kind) = record.kind() else {
                warn!(
                    id = %record.id,
                    kind = %record.notification_type,
                    "Skipping action back-fill for unrecognized type"
                );
                continue;
            };

            if store
                .set_action_if_absent(record.id, &routes::action_for(kind))
                .await?
            {
                changed += 1;
            }
        }

        repaired += changed;
        // A whole batch of unrecognized types would otherwise loop forever.
        if changed == 0 {
            break;
        }
    }

    if repaired > 0 {
        info!(repaired, "Back-filled notification actions");
    }
    Ok(repaired)
}

#[cfg(test)]
mod tests {
    use notify_entity::notification::action::NotificationAction;
    use notify_entity::notification::model::Notification;
    use notify_entity::notification::{NotificationType, Priority};

    use super::*;
    use crate::testing::MemoryNotificationStore;

    fn record(kind: NotificationType) -> Notification {
        Notification::new("0xabc", kind, Priority::Medium, "t", "m")
    }

    #[tokio::test]
    async fn test_backfill_is_idempotent_across_restarts() {
        let store = MemoryNotificationStore::default();

        // A legacy record without an action, and one that already has a
        // custom action which must survive untouched.
        let legacy = record(NotificationType::CircleCompleted);
        let custom = record(NotificationType::GoalCompleted)
            .with_action(NotificationAction::new("Custom", "/custom"));
        store.append(&legacy).await.unwrap();
        store.append(&custom).await.unwrap();

        // First load (first app restart).
        assert_eq!(backfill_actions(&store).await.unwrap(), 1);

        // Second load (second app restart): nothing changes.
        assert_eq!(backfill_actions(&store).await.unwrap(), 0);

        let records = store.all();
        let repaired = records.iter().find(|n| n.id == legacy.id).unwrap();
        assert_eq!(repaired.action.as_ref().unwrap().route, "/transactions");
        let untouched = records.iter().find(|n| n.id == custom.id).unwrap();
        assert_eq!(untouched.action.as_ref().unwrap().route, "/custom");
    }

    #[tokio::test]
    async fn test_backfill_skips_unrecognized_types() {
        let store = MemoryNotificationStore::default();
        let mut odd = record(NotificationType::AppUpdate);
        odd.notification_type = "kind_from_the_future".to_string();
        store.append(&odd).await.unwrap();

        assert_eq!(backfill_actions(&store).await.unwrap(), 0);
        assert!(store.all()[0].action.is_none());
    }
}
