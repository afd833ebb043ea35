//! HTTP server lifecycle.

use tokio_util::sync::CancellationToken;
use tracing::info;

use notify_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Bind and serve the API until the shutdown token fires.
pub async fn serve(state: AppState, shutdown: CancellationToken) -> Result<(), AppError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("HTTP server shutting down");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
