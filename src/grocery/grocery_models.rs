use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GroceryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub category: String,
    pub is_checked: bool,
    pub created_at: DateTime<Utc>,
}
