//! Event snapshot ingest.

use axum::Json;
use axum::extract::{Path, State};
use tokio_util::sync::CancellationToken;

use notify_core::events::EventSnapshot;
use notify_service::mapper::SyncReport;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::account_param;
use crate::state::AppState;

/// POST /api/accounts/{address}/sync
///
/// Upstream pollers deliver an account's full event snapshot here.
/// Redundant deliveries with identical contents are fine — the mapper's
/// dedup discipline makes them no-ops.
pub async fn ingest(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(snapshot): Json<EventSnapshot>,
) -> Result<Json<ApiResponse<SyncReport>>, ApiError> {
    let account = account_param(&address)?;
    let report = state
        .orchestrator
        .sync(&account, &snapshot, &CancellationToken::new())
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}
