//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use notify_cache::CacheManager;
use notify_core::config::AppConfig;
use notify_database::repositories::subscription::SubscriptionRepository;
use notify_delivery::{BackendClient, DeliveryChannel, StoreBackedPlatform};
use notify_service::{NotificationService, PreferenceService, SyncOrchestrator};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,

    // ── Repositories ─────────────────────────────────────────
    /// Push subscription repository.
    pub subscription_repo: Arc<SubscriptionRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Inbox service.
    pub notification_service: Arc<NotificationService>,
    /// Preference service.
    pub preference_service: Arc<PreferenceService>,
    /// Sync orchestrator.
    pub orchestrator: Arc<SyncOrchestrator>,

    // ── Delivery channel ─────────────────────────────────────
    /// Background delivery channel.
    pub delivery: Arc<DeliveryChannel>,
    /// Store-backed platform adapter (subscription hand-over).
    pub platform: Arc<StoreBackedPlatform>,
    /// Remote notification backend client.
    pub backend: Arc<BackendClient>,
}
