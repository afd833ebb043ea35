//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Push subscription hand-over from a client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    /// Push service endpoint URL.
    #[validate(url)]
    pub endpoint: String,
    /// Client key material.
    #[validate(nested)]
    pub keys: SubscriptionKeys,
}

/// Client key material of a push subscription.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscriptionKeys {
    /// Client public key (base64url, P-256).
    #[validate(length(min = 1))]
    pub p256dh: String,
    /// Client auth secret (base64url).
    #[validate(length(min = 1))]
    pub auth: String,
}

/// Unsubscribe request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnsubscribeRequest {
    /// Push service endpoint URL to drop.
    #[validate(url)]
    pub endpoint: String,
}

/// Partial preference update. Only keys present in the patch change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    /// Flag patch, merged onto the current preferences.
    pub preferences: serde_json::Value,
}
