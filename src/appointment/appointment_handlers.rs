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
    appointment_dto::{CreateAppointmentRequest, UpdateAppointmentRequest},
    appointment_models::Appointment,
};

#[derive(Deserialize)]
pub struct AppointmentListParams {
    month: Option<String>,
}

/// Get all appointments for the authenticated user
#[utoipa::path(
    get,
    path = "/api/appointments",
    params(
        ("month" = Option<String>, Query, description = "Restrict to a month (YYYY-MM)")
    ),
    responses(
        (status = 200, description = "List of appointments", body = Vec<Appointment>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn get_appointments(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<Vec<Appointment>>> {
    let appointments = state
        .appointment_service
        .list_appointments(user_id, params.month.as_deref())
        .await?;
    Ok(Json(appointments))
}

/// Create a new appointment
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let appointment = state
        .appointment_service
        .create_appointment(user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Get a single appointment owned by the authenticated user
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>> {
    let appointment = state
        .appointment_service
        .get_appointment(user_id, id)
        .await?;
    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let appointment = state
        .appointment_service
        .update_appointment(user_id, id, payload)
        .await?;

    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state
        .appointment_service
        .delete_appointment(user_id, id)
        .await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Appointment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
