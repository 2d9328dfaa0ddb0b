use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGroceryItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub quantity: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGroceryItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub quantity: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub is_checked: Option<bool>,
}
