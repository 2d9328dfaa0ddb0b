use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, middleware::AuthUser, state::AppState};
use super::subscription_dto::SubscribeRequest;

/// Save (or replace) the caller's push subscription
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscription saved"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subscriptions",
    security(("bearer_auth" = []))
)]
pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SubscribeRequest>,
) -> Result<impl IntoResponse> {
    state
        .subscription_repository
        .replace(
            user_id,
            &payload.endpoint,
            &payload.keys.p256dh,
            &payload.keys.auth,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Subscription saved." })),
    ))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode> {
    state.subscription_repository.delete_by_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
