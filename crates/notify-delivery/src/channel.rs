//! Delivery channel state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use notify_cache::CacheManager;
use notify_cache::keys;
use notify_core::config::PushConfig;
use notify_core::error::AppError;
use notify_core::result::AppResult;
use notify_core::traits::cache::CacheProvider;

use crate::display::{DisplayedNotification, NotificationDisplay};
use crate::platform::{PermissionProvider, PermissionState, PlatformSubscription, PushPlatform};
use crate::routing::ClickRouter;

/// Lifecycle of the background delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    /// No background worker active yet.
    Unregistered,
    /// Worker active, no push subscription.
    Registered,
    /// Push subscription negotiated. May be stale: the platform can
    /// discard the underlying subscription without telling anyone.
    Subscribed,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Control messages posted to the channel by the foreground app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Activate a pending worker update immediately.
    SkipWaiting,
}

impl ControlMessage {
    /// Parse a posted message. Unknown messages are ignored, not errors.
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        match value.get("type").and_then(|t| t.as_str()) {
            Some("SKIP_WAITING") => Some(Self::SkipWaiting),
            _ => None,
        }
    }
}

/// The background delivery channel.
///
/// Owns the subscription state machine and the channel's own persistent
/// store (a namespace the foreground never writes, except for the
/// backend URL handed over at subscribe time).
#[derive(Debug)]
pub struct DeliveryChannel {
    /// Current lifecycle state.
    state: Mutex<ChannelState>,
    /// Set once a permission prompt came back denied. Terminal for the
    /// session: no further prompts are attempted.
    permission_denied: AtomicBool,
    /// Platform permission system.
    permission: Arc<dyn PermissionProvider>,
    /// Platform push negotiation.
    platform: Arc<dyn PushPlatform>,
    /// The channel's out-of-band store.
    store: Arc<CacheManager>,
    /// OS notification surface.
    display: Arc<dyn NotificationDisplay>,
    /// Click router.
    router: ClickRouter,
    /// Push configuration.
    config: PushConfig,
}

impl DeliveryChannel {
    /// Create a channel in the unregistered state.
    pub fn new(
        permission: Arc<dyn PermissionProvider>,
        platform: Arc<dyn PushPlatform>,
        store: Arc<CacheManager>,
        display: Arc<dyn NotificationDisplay>,
        router: ClickRouter,
        config: PushConfig,
    ) -> Self {
        Self {
            state: Mutex::new(ChannelState::Unregistered),
            permission_denied: AtomicBool::new(false),
            permission,
            platform,
            store,
            display,
            router,
            config,
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> ChannelState {
        *self.state.lock().await
    }

    /// Mark the hosting environment's worker as active.
    pub async fn register(&self) {
        let mut state = self.state.lock().await;
        if *state == ChannelState::Unregistered {
            *state = ChannelState::Registered;
            info!("Delivery channel registered");
        }
    }

    /// Negotiate a push subscription after obtaining permission.
    ///
    /// A denied permission is terminal for the session: later calls fail
    /// immediately without re-prompting. A dismissed prompt is not
    /// terminal and may be retried on the next user action.
    pub async fn subscribe(&self) -> AppResult<PlatformSubscription> {
        {
            let state = self.state.lock().await;
            if *state == ChannelState::Unregistered {
                return Err(AppError::internal(
                    "Delivery channel is not registered yet",
                ));
            }
        }

        if self.permission_denied.load(Ordering::SeqCst) {
            return Err(AppError::permission_denied(
                "Notification permission was denied earlier this session",
            ));
        }

        match self.permission.request().await? {
            PermissionState::Granted => {}
            PermissionState::Denied => {
                self.permission_denied.store(true, Ordering::SeqCst);
                return Err(AppError::permission_denied(
                    "Notification permission denied",
                ));
            }
            PermissionState::Default => {
                return Err(AppError::permission_denied(
                    "Notification permission prompt was dismissed",
                ));
            }
        }

        let subscription = self
            .platform
            .subscribe(self.config.vapid_public_key.as_deref())
            .await?;
        validate_key_material(&subscription.p256dh, "p256dh")?;
        validate_key_material(&subscription.auth, "auth")?;

        // Hand the backend URL over to the background jobs through the
        // channel store.
        self.store
            .set_persistent(&keys::push_api_url(), &self.config.backend_url)
            .await?;

        *self.state.lock().await = ChannelState::Subscribed;
        info!(endpoint = %subscription.endpoint, "Push subscription negotiated");
        Ok(subscription)
    }

    /// Re-query the platform subscription.
    ///
    /// `Subscribed` is allowed to be stale; when the platform reports no
    /// live subscription the channel falls back to `Registered` so the
    /// next use re-negotiates.
    pub async fn current_subscription(&self) -> AppResult<Option<PlatformSubscription>> {
        let current = self.platform.current().await?;

        if current.is_none() {
            let mut state = self.state.lock().await;
            if *state == ChannelState::Subscribed {
                warn!("Platform discarded the push subscription; re-negotiation required");
                *state = ChannelState::Registered;
            }
        }

        Ok(current)
    }

    /// Drop the subscription.
    pub async fn unsubscribe(&self) -> AppResult<()> {
        self.platform.unsubscribe().await?;
        *self.state.lock().await = ChannelState::Unsubscribed;
        info!("Push subscription dropped");
        Ok(())
    }

    /// Handle an inbound push message: decode tolerantly and display.
    pub fn handle_push(&self, data: Option<&[u8]>) {
        self.display.show(DisplayedNotification::from_push(data));
    }

    /// Handle a notification click: resolve the route and land a window
    /// there. Returns the resolved path.
    pub async fn handle_click(&self, data: Option<&serde_json::Value>) -> AppResult<String> {
        self.router.route_click(data).await
    }

    /// Handle a posted control message. Returns whether it was recognized.
    pub fn handle_control(&self, message: &serde_json::Value) -> bool {
        match ControlMessage::parse(message) {
            Some(ControlMessage::SkipWaiting) => {
                info!("Activating pending worker update");
                true
            }
            None => {
                debug!("Ignoring unrecognized control message");
                false
            }
        }
    }
}

/// Validate that subscription key material is base64 (url-safe or
/// standard alphabet).
fn validate_key_material(material: &str, field: &str) -> AppResult<()> {
    let url_safe = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let standard = base64::engine::general_purpose::STANDARD;

    if url_safe.decode(material).is_ok() || standard.decode(material).is_ok() {
        return Ok(());
    }
    Err(AppError::validation(format!(
        "Subscription field '{field}' is not valid base64"
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use notify_cache::memory::MemoryCacheProvider;
    use notify_core::config::cache::MemoryCacheConfig;

    use super::*;
    use crate::display::TagBoard;
    use crate::routing::{ClientSurface, ClientWindow};

    #[derive(Debug)]
    struct FakePermission {
        answers: StdMutex<Vec<PermissionState>>,
        requests: StdMutex<usize>,
    }

    impl FakePermission {
        fn answering(answers: Vec<PermissionState>) -> Arc<Self> {
            Arc::new(Self {
                answers: StdMutex::new(answers),
                requests: StdMutex::new(0),
            })
        }

        fn request_count(&self) -> usize {
            *self.requests.lock().unwrap()
        }
    }

    #[async_trait]
    impl PermissionProvider for FakePermission {
        async fn request(&self) -> AppResult<PermissionState> {
            *self.requests.lock().unwrap() += 1;
            let mut answers = self.answers.lock().unwrap();
            Ok(if answers.is_empty() {
                PermissionState::Granted
            } else {
                answers.remove(0)
            })
        }
    }

    #[derive(Debug)]
    struct FakePlatform {
        alive: StdMutex<Option<PlatformSubscription>>,
    }

    impl FakePlatform {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                alive: StdMutex::new(None),
            })
        }

        fn discard(&self) {
            *self.alive.lock().unwrap() = None;
        }
    }

    #[async_trait]
    impl PushPlatform for FakePlatform {
        async fn subscribe(&self, _vapid: Option<&str>) -> AppResult<PlatformSubscription> {
            let subscription = PlatformSubscription {
                endpoint: "https://push.example/ep1".to_string(),
                p256dh: "BPdh_key".to_string(),
                auth: "c2VjcmV0".to_string(),
            };
            *self.alive.lock().unwrap() = Some(subscription.clone());
            Ok(subscription)
        }

        async fn current(&self) -> AppResult<Option<PlatformSubscription>> {
            Ok(self.alive.lock().unwrap().clone())
        }

        async fn unsubscribe(&self) -> AppResult<()> {
            *self.alive.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct NoWindows;

    #[async_trait]
    impl ClientSurface for NoWindows {
        async fn clients(&self) -> AppResult<Vec<ClientWindow>> {
            Ok(vec![])
        }
        async fn focus(&self, _id: &str) -> AppResult<()> {
            Ok(())
        }
        async fn navigate(&self, _id: &str, _path: &str) -> AppResult<()> {
            Ok(())
        }
        async fn open(&self, _path: &str) -> AppResult<()> {
            Ok(())
        }
    }

    struct Harness {
        channel: DeliveryChannel,
        permission: Arc<FakePermission>,
        platform: Arc<FakePlatform>,
        store: Arc<CacheManager>,
        board: Arc<TagBoard>,
    }

    fn harness(answers: Vec<PermissionState>) -> Harness {
        let permission = FakePermission::answering(answers);
        let platform = FakePlatform::new();
        let store = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60),
        )));
        let board = Arc::new(TagBoard::new());
        let channel = DeliveryChannel::new(
            permission.clone(),
            platform.clone(),
            store.clone(),
            board.clone(),
            ClickRouter::new(Arc::new(NoWindows)),
            PushConfig::default(),
        );
        Harness {
            channel,
            permission,
            platform,
            store,
            board,
        }
    }

    #[tokio::test]
    async fn test_subscribe_happy_path() {
        let h = harness(vec![PermissionState::Granted]);
        h.channel.register().await;

        let subscription = h.channel.subscribe().await.unwrap();
        assert_eq!(subscription.endpoint, "https://push.example/ep1");
        assert_eq!(h.channel.state().await, ChannelState::Subscribed);

        // The backend URL crossed into the channel store.
        let url = h.store.get(&keys::push_api_url()).await.unwrap();
        assert_eq!(url, Some(PushConfig::default().backend_url));
    }

    #[tokio::test]
    async fn test_subscribe_requires_registration() {
        let h = harness(vec![]);
        assert!(h.channel.subscribe().await.is_err());
        assert_eq!(h.channel.state().await, ChannelState::Unregistered);
    }

    #[tokio::test]
    async fn test_denied_is_terminal_for_session() {
        let h = harness(vec![PermissionState::Denied, PermissionState::Granted]);
        h.channel.register().await;

        assert!(h.channel.subscribe().await.is_err());
        // Second attempt fails without prompting again, even though the
        // platform would now answer Granted.
        assert!(h.channel.subscribe().await.is_err());
        assert_eq!(h.permission.request_count(), 1);
    }

    #[tokio::test]
    async fn test_dismissed_prompt_can_be_retried() {
        let h = harness(vec![PermissionState::Default, PermissionState::Granted]);
        h.channel.register().await;

        assert!(h.channel.subscribe().await.is_err());
        assert!(h.channel.subscribe().await.is_ok());
        assert_eq!(h.permission.request_count(), 2);
    }

    #[tokio::test]
    async fn test_silent_invalidation_detected_by_requery() {
        let h = harness(vec![PermissionState::Granted]);
        h.channel.register().await;
        h.channel.subscribe().await.unwrap();

        // The platform quietly drops the subscription.
        h.platform.discard();

        let current = h.channel.current_subscription().await.unwrap();
        assert!(current.is_none());
        assert_eq!(h.channel.state().await, ChannelState::Registered);
    }

    #[tokio::test]
    async fn test_handle_push_lands_on_the_board() {
        let h = harness(vec![]);
        h.channel
            .handle_push(Some(
                br#"{"title":"X","message":"Y","type":"circle_started"}"#.as_slice(),
            ));

        let shown = h.board.get("circle_started").unwrap();
        assert_eq!(shown.title, "X");
        assert_eq!(shown.body, "Y");
    }

    #[tokio::test]
    async fn test_control_message_recognition() {
        let h = harness(vec![]);
        assert!(h
            .channel
            .handle_control(&serde_json::json!({"type": "SKIP_WAITING"})));
        assert!(!h.channel.handle_control(&serde_json::json!({"type": "NOPE"})));
    }
}
