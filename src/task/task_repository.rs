use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::task_models::Task;

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's tasks, optionally restricted to a `YYYY-MM` month.
    pub async fn find_all(&self, user_id: Uuid, month: Option<&str>) -> Result<Vec<Task>> {
        let tasks = match month {
            Some(month) => {
                sqlx::query_as::<_, Task>(
                    "SELECT * FROM tasks
                     WHERE user_id = $1 AND TO_CHAR(due_date, 'YYYY-MM') = $2
                     ORDER BY due_date ASC",
                )
                .bind(user_id)
                .bind(month)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Task>(
                    "SELECT * FROM tasks WHERE user_id = $1 ORDER BY due_date ASC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        description: &str,
        notes: Option<&str>,
        due_date: DateTime<Utc>,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, description, notes, due_date)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(user_id)
        .bind(description)
        .bind(notes)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        description: Option<&str>,
        notes: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        status: Option<&str>,
    ) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                description = COALESCE($1, description),
                notes = COALESCE($2, notes),
                due_date = COALESCE($3, due_date),
                status = COALESCE($4, status),
                updated_at = NOW()
             WHERE id = $5 AND user_id = $6
             RETURNING *",
        )
        .bind(description)
        .bind(notes)
        .bind(due_date)
        .bind(status)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Pending tasks across all users due inside the closed interval
    /// `[start, end]`. Read-only: the notifier never mutates task state.
    pub async fn find_due_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks
             WHERE due_date BETWEEN $1 AND $2 AND status = 'pending'",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
