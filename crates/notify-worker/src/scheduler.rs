//! Cron scheduler for periodic background tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use notify_core::config::WorkerConfig;
use notify_core::error::AppError;

use crate::jobs::{PushCheckJob, ReconcileJob, ResyncJob};

/// Cron-based scheduler for periodic background tasks.
pub struct NotifyScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Worker configuration (schedules).
    config: WorkerConfig,
    /// Periodic push check.
    push_check: Arc<PushCheckJob>,
    /// Snapshot re-sync.
    resync: Arc<ResyncJob>,
    /// Subscription reconciliation.
    reconcile: Arc<ReconcileJob>,
}

impl std::fmt::Debug for NotifyScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyScheduler").finish()
    }
}

impl NotifyScheduler {
    /// Create a new scheduler.
    pub async fn new(
        config: WorkerConfig,
        push_check: Arc<PushCheckJob>,
        resync: Arc<ResyncJob>,
        reconcile: Arc<ReconcileJob>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            config,
            push_check,
            resync,
            reconcile,
        })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_push_check().await?;
        self.register_resync().await?;
        self.register_reconcile().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Periodic push `/check` sync.
    async fn register_push_check(&self) -> Result<(), AppError> {
        let job = Arc::clone(&self.push_check);
        let cron = CronJob::new_async(self.config.push_check_schedule.as_str(), move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                job.run().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create push_check schedule: {e}")))?;

        self.scheduler
            .add(cron)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add push_check schedule: {e}")))?;

        tracing::info!(schedule = %self.config.push_check_schedule, "Registered: push_check");
        Ok(())
    }

    /// Snapshot re-sync over cached event collections.
    async fn register_resync(&self) -> Result<(), AppError> {
        let job = Arc::clone(&self.resync);
        let cron = CronJob::new_async(self.config.resync_schedule.as_str(), move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                job.run().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create resync schedule: {e}")))?;

        self.scheduler
            .add(cron)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add resync schedule: {e}")))?;

        tracing::info!(schedule = %self.config.resync_schedule, "Registered: resync");
        Ok(())
    }

    /// Push subscription reconciliation.
    async fn register_reconcile(&self) -> Result<(), AppError> {
        let job = Arc::clone(&self.reconcile);
        let cron = CronJob::new_async(
            self.config.reconcile_schedule.as_str(),
            move |_uuid, _lock| {
                let job = Arc::clone(&job);
                Box::pin(async move {
                    job.run().await;
                })
            },
        )
        .map_err(|e| AppError::internal(format!("Failed to create reconcile schedule: {e}")))?;

        self.scheduler
            .add(cron)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add reconcile schedule: {e}")))?;

        tracing::info!(schedule = %self.config.reconcile_schedule, "Registered: reconcile");
        Ok(())
    }
}
