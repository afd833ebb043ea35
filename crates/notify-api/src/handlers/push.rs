//! Push subscription handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::warn;
use validator::Validate;

use notify_core::error::AppError;
use notify_delivery::PlatformSubscription;
use notify_entity::subscription::PushSubscription;

use crate::dto::request::{SubscribeRequest, UnsubscribeRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::account_param;
use crate::state::AppState;

/// POST /api/accounts/{address}/push/subscribe
///
/// The client negotiated the subscription with its own platform and
/// hands it over here. The subscription is persisted, installed as the
/// channel's live platform subscription, run through the channel state
/// machine (which writes the backend URL into the channel store), and
/// forwarded to the remote backend best-effort.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let account = account_param(&address)?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid subscription: {e}")))?;

    let record = PushSubscription::new(&account, &req.endpoint, &req.keys.p256dh, &req.keys.auth);
    state.subscription_repo.upsert(&record).await?;

    let platform_subscription = PlatformSubscription {
        endpoint: req.endpoint.clone(),
        p256dh: req.keys.p256dh.clone(),
        auth: req.keys.auth.clone(),
    };
    state.platform.install(&platform_subscription).await?;
    state.delivery.subscribe().await?;

    if let Err(e) = state.backend.subscribe(&account, &platform_subscription).await {
        warn!(account, error = %e, "Backend subscribe forward failed");
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Subscribed".to_string(),
    })))
}

/// POST /api/accounts/{address}/push/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(req): Json<UnsubscribeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let account = account_param(&address)?;

    state.delivery.unsubscribe().await?;
    state.subscription_repo.delete_endpoint(&req.endpoint).await?;

    if let Err(e) = state.backend.unsubscribe(&account, &req.endpoint).await {
        warn!(account, error = %e, "Backend unsubscribe forward failed");
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Unsubscribed".to_string(),
    })))
}
