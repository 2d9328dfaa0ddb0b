use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
};
use super::{
    grocery_dto::{CreateGroceryItemRequest, UpdateGroceryItemRequest},
    grocery_models::GroceryItem,
};

#[derive(Deserialize)]
pub struct GroceryListParams {
    category: Option<String>,
}

/// List grocery items, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/grocery",
    params(
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List of grocery items", body = Vec<GroceryItem>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "grocery",
    security(("bearer_auth" = []))
)]
pub async fn get_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<GroceryListParams>,
) -> Result<Json<Vec<GroceryItem>>> {
    let items = state
        .grocery_repository
        .find_all(user_id, params.category.as_deref())
        .await?;
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGroceryItemRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = state
        .grocery_repository
        .create(
            user_id,
            &payload.name,
            payload.quantity.as_deref(),
            &payload.category,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

// Covers both edits and checking/unchecking an item
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGroceryItemRequest>,
) -> Result<Json<GroceryItem>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = state
        .grocery_repository
        .update(
            id,
            user_id,
            payload.name.as_deref(),
            payload.quantity.as_deref(),
            payload.category.as_deref(),
            payload.is_checked,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state.grocery_repository.delete(id, user_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Item not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
