//! Push subscription entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered push endpoint.
///
/// An endpoint belongs to exactly one account at a time; re-subscribing
/// the same endpoint under a different account re-assigns it. The platform
/// can silently discard the underlying subscription, which is only
/// detected by re-query during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PushSubscription {
    /// The subscribed wallet address, lowercase.
    pub account: String,
    /// Push service endpoint URL. Unique.
    pub endpoint: String,
    /// Client public key (base64, P-256).
    pub p256dh: String,
    /// Client auth secret (base64).
    pub auth: String,
    /// When the subscription was registered.
    pub created_at: DateTime<Utc>,
}

impl PushSubscription {
    /// Create a new subscription record stamped with the current instant.
    pub fn new(
        account: impl Into<String>,
        endpoint: impl Into<String>,
        p256dh: impl Into<String>,
        auth: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            endpoint: endpoint.into(),
            p256dh: p256dh.into(),
            auth: auth.into(),
            created_at: Utc::now(),
        }
    }
}
