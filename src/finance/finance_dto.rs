use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub amount: f64,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub transaction_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub amount: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Shared query filters for transaction listing and the summary view.
#[derive(Debug, Deserialize)]
pub struct FinanceFilters {
    pub category: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}
