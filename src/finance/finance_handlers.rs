use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
};
use super::{
    finance_dto::{CreateTransactionRequest, FinanceFilters, UpdateTransactionRequest},
    finance_models::{FinanceSummary, Transaction},
};

/// List transactions with optional category/month/year filters
#[utoipa::path(
    get,
    path = "/api/finances",
    params(
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("month" = Option<u32>, Query, description = "Filter by month (1-12)"),
        ("year" = Option<i32>, Query, description = "Filter by year")
    ),
    responses(
        (status = 200, description = "List of transactions", body = Vec<Transaction>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "finances",
    security(("bearer_auth" = []))
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filters): Query<FinanceFilters>,
) -> Result<Json<Vec<Transaction>>> {
    let transactions = state.finance_repository.find_all(user_id, &filters).await?;
    Ok(Json(transactions))
}

/// Spending summary (total plus per-category totals)
#[utoipa::path(
    get,
    path = "/api/finances/summary",
    params(
        ("month" = Option<u32>, Query, description = "Filter by month (1-12)"),
        ("year" = Option<i32>, Query, description = "Filter by year")
    ),
    responses(
        (status = 200, description = "Summary", body = FinanceSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "finances",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filters): Query<FinanceFilters>,
) -> Result<Json<FinanceSummary>> {
    let summary = state.finance_repository.summary(user_id, &filters).await?;
    Ok(Json(summary))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let transaction = state
        .finance_repository
        .create(
            user_id,
            &payload.name,
            payload.amount,
            &payload.category,
            payload.transaction_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let transaction = state
        .finance_repository
        .update(
            id,
            user_id,
            payload.name.as_deref(),
            payload.amount,
            payload.category.as_deref(),
            payload.transaction_date,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

    Ok(Json(transaction))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state.finance_repository.delete(id, user_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Transaction not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
