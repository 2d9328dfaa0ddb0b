use axum::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::appointment::appointment_models::Appointment;
use crate::appointment::appointment_repository::AppointmentRepository;
use crate::error::Result;
use crate::subscription::subscription_models::PushSubscription;
use crate::subscription::subscription_repository::SubscriptionRepository;
use crate::task::task_models::Task;
use crate::task::task_repository::TaskRepository;

use super::scan::NotifierStore;

/// Production store: delegates the scan's queries to the sqlx repositories.
#[derive(Clone)]
pub struct PgNotifierStore {
    tasks: TaskRepository,
    appointments: AppointmentRepository,
    subscriptions: SubscriptionRepository,
}

impl PgNotifierStore {
    pub fn new(
        tasks: TaskRepository,
        appointments: AppointmentRepository,
        subscriptions: SubscriptionRepository,
    ) -> Self {
        Self {
            tasks,
            appointments,
            subscriptions,
        }
    }
}

#[async_trait]
impl NotifierStore for PgNotifierStore {
    async fn due_tasks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Task>> {
        self.tasks.find_due_in_window(start, end).await
    }

    async fn due_appointments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>> {
        self.appointments.find_in_window(start, end).await
    }

    async fn subscription_for(&self, user_id: Uuid) -> Result<Option<PushSubscription>> {
        self.subscriptions.find_by_user(user_id).await
    }

    async fn remove_subscription(&self, user_id: Uuid) -> Result<()> {
        self.subscriptions.delete_by_user(user_id).await?;
        Ok(())
    }
}
