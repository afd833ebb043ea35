//! Platform seams: permission prompts and push subscription negotiation.
//!
//! The hosting platform (browser, OS push service) is outside this crate;
//! these traits are the contract it is driven through.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use notify_cache::CacheManager;
use notify_cache::keys;
use notify_core::error::AppError;
use notify_core::result::AppResult;
use notify_core::traits::cache::CacheProvider;

/// Outcome of a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// The user dismissed the prompt without deciding.
    Default,
    /// Permission granted.
    Granted,
    /// Permission denied. Terminal for the session: nothing in this app
    /// can re-prompt, the user has to change it in platform settings.
    Denied,
}

/// The platform's view of a push subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSubscription {
    /// Push service endpoint URL.
    pub endpoint: String,
    /// Client public key (base64url, P-256).
    pub p256dh: String,
    /// Client auth secret (base64url).
    pub auth: String,
}

/// Asks the platform permission system for notification access.
#[async_trait]
pub trait PermissionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Prompt (or re-read) the notification permission.
    async fn request(&self) -> AppResult<PermissionState>;
}

/// Negotiates push subscriptions with the platform.
///
/// The platform can silently discard a subscription at any time. That is
/// only observable through [`PushPlatform::current`] returning `None`, so
/// holders of a "subscribed" state must treat it as possibly stale.
#[async_trait]
pub trait PushPlatform: Send + Sync + std::fmt::Debug + 'static {
    /// Negotiate a new subscription.
    async fn subscribe(&self, vapid_public_key: Option<&str>) -> AppResult<PlatformSubscription>;

    /// Re-query the live subscription, if the platform still has one.
    async fn current(&self) -> AppResult<Option<PlatformSubscription>>;

    /// Re-query whether a specific endpoint is still backed by a live
    /// platform subscription. Used by the reconciliation sweep.
    async fn is_alive(&self, endpoint: &str) -> AppResult<bool> {
        Ok(self
            .current()
            .await?
            .map(|s| s.endpoint == endpoint)
            .unwrap_or(false))
    }

    /// Drop the platform subscription.
    async fn unsubscribe(&self) -> AppResult<()>;
}

/// Permission provider for contexts where the prompt already happened
/// elsewhere: a client only hands over a subscription after its own
/// platform granted it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantedPermission;

#[async_trait]
impl PermissionProvider for GrantedPermission {
    async fn request(&self) -> AppResult<PermissionState> {
        Ok(PermissionState::Granted)
    }
}

/// Platform adapter backed by the channel store.
///
/// Server-side rendition of the platform subscription registry: the
/// foreground writes the client-negotiated subscription into the channel
/// store, and this adapter re-reads it on every query. Invalidation is
/// observable only through that re-read.
#[derive(Debug)]
pub struct StoreBackedPlatform {
    store: Arc<CacheManager>,
}

impl StoreBackedPlatform {
    /// Create an adapter over the channel store.
    pub fn new(store: Arc<CacheManager>) -> Self {
        Self { store }
    }

    /// Record a client-negotiated subscription as the live one.
    pub async fn install(&self, subscription: &PlatformSubscription) -> AppResult<()> {
        let raw = serde_json::to_string(subscription)?;
        self.store
            .set_persistent(&keys::push_subscription(), &raw)
            .await
    }
}

#[async_trait]
impl PushPlatform for StoreBackedPlatform {
    async fn subscribe(&self, _vapid_public_key: Option<&str>) -> AppResult<PlatformSubscription> {
        self.current().await?.ok_or_else(|| {
            AppError::service_unavailable("No platform subscription has been handed over")
        })
    }

    async fn current(&self) -> AppResult<Option<PlatformSubscription>> {
        Ok(self
            .store
            .get(&keys::push_subscription())
            .await?
            .and_then(|raw| serde_json::from_str(&raw).ok()))
    }

    async fn unsubscribe(&self) -> AppResult<()> {
        self.store.delete(&keys::push_subscription()).await
    }
}
