//! Preference handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::warn;

use notify_entity::preference::NotificationPreferences;

use crate::dto::request::UpdatePreferencesRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::account_param;
use crate::state::AppState;

/// GET /api/accounts/{address}/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<NotificationPreferences>>, ApiError> {
    let account = account_param(&address)?;
    let prefs = state.preference_service.get(&account).await?;
    Ok(Json(ApiResponse::ok(prefs)))
}

/// PUT /api/accounts/{address}/preferences
///
/// Merge semantics: only the keys present in the patch change. The
/// merged flags are mirrored to the remote backend best-effort so it can
/// filter pushes server-side.
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(req): Json<UpdatePreferencesRequest>,
) -> Result<Json<ApiResponse<NotificationPreferences>>, ApiError> {
    let account = account_param(&address)?;
    let merged = state
        .preference_service
        .update(&account, &req.preferences)
        .await?;

    if let Err(e) = state.backend.update_preferences(&account, &merged).await {
        warn!(account, error = %e, "Backend preference mirror failed");
    }

    Ok(Json(ApiResponse::ok(merged)))
}
