//! Client for the remote notification backend.
//!
//! Only the request/response shapes are modeled; the backend itself is an
//! external collaborator. Every call carries the configured bounded
//! timeout.

use std::time::Duration;

use tracing::debug;

use notify_core::config::PushConfig;
use notify_core::error::AppError;
use notify_core::result::AppResult;
use notify_entity::preference::NotificationPreferences;

use crate::payload::PushPayload;
use crate::platform::PlatformSubscription;

/// HTTP client for the notification backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client from push configuration.
    pub fn new(config: &PushConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.check_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::external_service(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /subscribe` — register a push subscription for an account.
    pub async fn subscribe(
        &self,
        account: &str,
        subscription: &PlatformSubscription,
    ) -> AppResult<()> {
        let body = serde_json::json!({
            "account": account,
            "subscription": {
                "endpoint": subscription.endpoint,
                "keys": {
                    "p256dh": subscription.p256dh,
                    "auth": subscription.auth,
                },
            },
        });

        self.post("subscribe", &body).await
    }

    /// `POST /unsubscribe` — drop a push subscription.
    pub async fn unsubscribe(&self, account: &str, endpoint: &str) -> AppResult<()> {
        let body = serde_json::json!({
            "account": account,
            "endpoint": endpoint,
        });

        self.post("unsubscribe", &body).await
    }

    /// `PUT /preferences` — mirror preference flags to the backend so it
    /// can filter pushes server-side.
    pub async fn update_preferences(
        &self,
        account: &str,
        preferences: &NotificationPreferences,
    ) -> AppResult<()> {
        let body = serde_json::json!({
            "account": account,
            "preferences": preferences,
        });

        let url = format!("{}/preferences", self.base_url);
        self.http
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("PUT {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("PUT {url} rejected: {e}")))?;
        Ok(())
    }

    /// `GET {api_url}/check` — fetch pending notifications. The URL comes
    /// from the channel store, not this client's configuration, because
    /// the background jobs may outlive a config change.
    pub async fn check(&self, api_url: &str) -> AppResult<Vec<PushPayload>> {
        let url = format!("{}/check", api_url.trim_end_matches('/'));
        debug!(url, "Checking for pending notifications");

        let pending = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("GET {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("GET {url} rejected: {e}")))?
            .json::<Vec<PushPayload>>()
            .await
            .map_err(|e| AppError::external_service(format!("GET {url} bad body: {e}")))?;

        Ok(pending)
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> AppResult<()> {
        let url = format!("{}/{path}", self.base_url);
        self.http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("POST {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("POST {url} rejected: {e}")))?;
        Ok(())
    }
}
