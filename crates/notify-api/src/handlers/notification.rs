//! Notification inbox handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::dto::response::{ApiResponse, CountResponse, MessageResponse, NotificationListResponse};
use crate::error::ApiError;
use crate::extractors::{PaginationParams, account_param};
use crate::state::AppState;

/// GET /api/accounts/{address}/notifications
pub async fn list(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<NotificationListResponse>>, ApiError> {
    let account = account_param(&address)?;
    let page = state
        .notification_service
        .list(&account, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/accounts/{address}/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let account = account_param(&address)?;
    let count = state.notification_service.unread_count(&account).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/accounts/{address}/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path((address, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let account = account_param(&address)?;
    state.notification_service.mark_read(&account, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}

/// PUT /api/accounts/{address}/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let account = account_param(&address)?;
    let count = state.notification_service.mark_all_read(&account).await?;
    Ok(Json(ApiResponse::ok(CountResponse {
        count: count as i64,
    })))
}

/// DELETE /api/accounts/{address}/notifications/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path((address, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let account = account_param(&address)?;
    state.notification_service.remove(&account, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Removed".to_string(),
    })))
}

/// DELETE /api/accounts/{address}/notifications
pub async fn clear(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let account = account_param(&address)?;
    let count = state.notification_service.clear(&account).await?;
    Ok(Json(ApiResponse::ok(CountResponse {
        count: count as i64,
    })))
}

/// DELETE /api/accounts/{address}/dedup
///
/// Debug affordance: clears the consumed dedup keys so previously
/// notified events can fire again on the next sync.
pub async fn reset_dedup(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let account = account_param(&address)?;
    let count = state.notification_service.reset_dedup(&account).await?;
    Ok(Json(ApiResponse::ok(CountResponse {
        count: count as i64,
    })))
}
