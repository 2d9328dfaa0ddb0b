use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub notes: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub is_important: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAppointmentRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub notes: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub is_important: Option<bool>,
}
