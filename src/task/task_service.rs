use crate::error::{AppError, Result};
use crate::task::task_dto::{CreateTaskRequest, UpdateTaskRequest};
use crate::task::task_models::{Task, TaskStatus};
use crate::task::task_repository::TaskRepository;
use std::str::FromStr;
use uuid::Uuid;

/// Service layer for task-related business logic.
#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
}

impl TaskService {
    pub fn new(repo: TaskRepository) -> Self {
        Self { repo }
    }

    pub async fn list_tasks(&self, user_id: Uuid, month: Option<&str>) -> Result<Vec<Task>> {
        self.repo.find_all(user_id, month).await
    }

    pub async fn get_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Task> {
        self.repo
            .find_by_id(task_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn create_task(&self, user_id: Uuid, payload: CreateTaskRequest) -> Result<Task> {
        self.repo
            .create(
                user_id,
                &payload.description,
                payload.notes.as_deref(),
                payload.due_date,
            )
            .await
    }

    pub async fn update_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        payload: UpdateTaskRequest,
    ) -> Result<Task> {
        if let Some(ref status) = payload.status {
            TaskStatus::from_str(status).map_err(AppError::Validation)?;
        }

        self.repo
            .update(
                task_id,
                user_id,
                payload.description.as_deref(),
                payload.notes.as_deref(),
                payload.due_date,
                payload.status.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> Result<u64> {
        self.repo.delete(task_id, user_id).await
    }
}
