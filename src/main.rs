//! Circlepot Notify — notification service for the Circlepot savings
//! platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use notify_cache::CacheManager;
use notify_core::config::AppConfig;
use notify_core::error::AppError;
use notify_core::traits::store::DedupStore;
use notify_database::DatabasePool;
use notify_database::repositories::notification::NotificationRepository;
use notify_database::repositories::preference::PreferenceRepository;
use notify_database::repositories::processed_event::ProcessedEventRepository;
use notify_database::repositories::subscription::SubscriptionRepository;
use notify_delivery::{
    BackendClient, ClickRouter, DeliveryChannel, GrantedPermission, HeadlessSurface,
    NotificationDisplay, PeriodicSync, PushPlatform, StoreBackedPlatform, TagBoard,
};
use notify_service::store::{NotificationStore, PreferenceStore};
use notify_service::{NotificationService, PreferenceService, SyncOrchestrator};
use notify_worker::NotifyScheduler;
use notify_worker::jobs::{PushCheckJob, ReconcileJob, ResyncJob};

#[tokio::main]
async fn main() {
    let env = std::env::var("CIRCLEPOT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Circlepot Notify v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    notify_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let notification_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
    let processed_repo = Arc::new(ProcessedEventRepository::new(db.pool().clone()));
    let preference_repo = Arc::new(PreferenceRepository::new(db.pool().clone()));
    let subscription_repo = Arc::new(SubscriptionRepository::new(db.pool().clone()));

    // ── Step 3: Action back-fill for pre-action records ──────────
    notify_service::migrate::backfill_actions(notification_repo.as_ref()).await?;

    // ── Step 4: Cache ────────────────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 5: Services ─────────────────────────────────────────
    let notification_store: Arc<dyn NotificationStore> = notification_repo.clone();
    let dedup_store: Arc<dyn DedupStore> = processed_repo.clone();
    let preference_store: Arc<dyn PreferenceStore> = preference_repo.clone();

    let notification_service = Arc::new(NotificationService::new(
        notification_store.clone(),
        dedup_store.clone(),
        cache.clone(),
    ));
    let preference_service = Arc::new(PreferenceService::new(preference_store.clone()));
    let orchestrator = Arc::new(SyncOrchestrator::new(
        notification_store,
        dedup_store,
        preference_store,
        cache.clone(),
        config.sync.clone(),
    ));

    // ── Step 6: Delivery channel ─────────────────────────────────
    let platform = Arc::new(StoreBackedPlatform::new(cache.clone()));
    let display: Arc<dyn NotificationDisplay> = Arc::new(TagBoard::new());
    let delivery = Arc::new(DeliveryChannel::new(
        Arc::new(GrantedPermission),
        platform.clone() as Arc<dyn PushPlatform>,
        cache.clone(),
        display.clone(),
        ClickRouter::new(Arc::new(HeadlessSurface)),
        config.push.clone(),
    ));
    delivery.register().await;

    let backend = Arc::new(BackendClient::new(&config.push)?);
    let periodic_sync = Arc::new(PeriodicSync::new(
        cache.clone(),
        backend.clone(),
        display.clone(),
    ));

    // ── Step 7: Worker ───────────────────────────────────────────
    let shutdown = CancellationToken::new();

    let mut scheduler = if config.worker.enabled {
        let push_check = Arc::new(PushCheckJob::new(periodic_sync));
        let resync = Arc::new(ResyncJob::new(orchestrator.clone(), shutdown.clone()));
        let reconcile = Arc::new(ReconcileJob::new(
            platform.clone() as Arc<dyn PushPlatform>,
            subscription_repo.clone(),
        ));

        let scheduler =
            NotifyScheduler::new(config.worker.clone(), push_check, resync, reconcile).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled by configuration");
        None
    };

    // ── Step 8: HTTP server ──────────────────────────────────────
    let state = notify_api::AppState {
        config: Arc::new(config),
        db_pool: db.pool().clone(),
        cache,
        subscription_repo,
        notification_service,
        preference_service,
        orchestrator,
        delivery,
        platform,
        backend,
    };

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    notify_api::app::serve(state, shutdown.clone()).await?;

    // ── Step 9: Drain ────────────────────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("Circlepot Notify stopped");
    Ok(())
}
