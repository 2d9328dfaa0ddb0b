use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::appointment_models::Appointment;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, user_id: Uuid, month: Option<&str>) -> Result<Vec<Appointment>> {
        let appointments = match month {
            Some(month) => {
                sqlx::query_as::<_, Appointment>(
                    "SELECT * FROM appointments
                     WHERE user_id = $1 AND TO_CHAR(appointment_date, 'YYYY-MM') = $2
                     ORDER BY appointment_date ASC",
                )
                .bind(user_id)
                .bind(month)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Appointment>(
                    "SELECT * FROM appointments WHERE user_id = $1 ORDER BY appointment_date ASC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(appointment)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        notes: Option<&str>,
        appointment_date: DateTime<Utc>,
        is_important: bool,
    ) -> Result<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (user_id, title, notes, appointment_date, is_important)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(notes)
        .bind(appointment_date)
        .bind(is_important)
        .fetch_one(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        notes: Option<&str>,
        appointment_date: Option<DateTime<Utc>>,
        is_important: Option<bool>,
    ) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET
                title = COALESCE($1, title),
                notes = COALESCE($2, notes),
                appointment_date = COALESCE($3, appointment_date),
                is_important = COALESCE($4, is_important),
                updated_at = NOW()
             WHERE id = $5 AND user_id = $6
             RETURNING *",
        )
        .bind(title)
        .bind(notes)
        .bind(appointment_date)
        .bind(is_important)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Appointments across all users inside the closed interval `[start, end]`.
    /// Eligible regardless of the importance flag.
    pub async fn find_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE appointment_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }
}
