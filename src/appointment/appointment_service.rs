use crate::appointment::appointment_dto::{CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::appointment::appointment_models::Appointment;
use crate::appointment::appointment_repository::AppointmentRepository;
use crate::error::{AppError, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
}

impl AppointmentService {
    pub fn new(repo: AppointmentRepository) -> Self {
        Self { repo }
    }

    pub async fn list_appointments(
        &self,
        user_id: Uuid,
        month: Option<&str>,
    ) -> Result<Vec<Appointment>> {
        self.repo.find_all(user_id, month).await
    }

    pub async fn get_appointment(&self, user_id: Uuid, id: Uuid) -> Result<Appointment> {
        self.repo
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".into()))
    }

    pub async fn create_appointment(
        &self,
        user_id: Uuid,
        payload: CreateAppointmentRequest,
    ) -> Result<Appointment> {
        self.repo
            .create(
                user_id,
                &payload.title,
                payload.notes.as_deref(),
                payload.appointment_date,
                payload.is_important.unwrap_or(false),
            )
            .await
    }

    pub async fn update_appointment(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateAppointmentRequest,
    ) -> Result<Appointment> {
        self.repo
            .update(
                id,
                user_id,
                payload.title.as_deref(),
                payload.notes.as_deref(),
                payload.appointment_date,
                payload.is_important,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".into()))
    }

    pub async fn delete_appointment(&self, user_id: Uuid, id: Uuid) -> Result<u64> {
        self.repo.delete(id, user_id).await
    }
}
