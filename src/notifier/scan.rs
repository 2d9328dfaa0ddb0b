use axum::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use uuid::Uuid;

use crate::appointment::appointment_models::Appointment;
use crate::error::Result;
use crate::subscription::subscription_models::PushSubscription;
use crate::task::task_models::Task;

use super::push::{PushClient, PushOutcome, PushPayload};

/// How far ahead of a due time the scan looks. Together with the one-minute
/// cadence this bounds notification latency to under 16 minutes.
pub const LOOKAHEAD_MINUTES: i64 = 15;

const TASK_TITLE: &str = "Task upcoming";
const APPOINTMENT_TITLE: &str = "Appointment scheduled";

/// One pending announcement. Built during a scan, dispatched immediately,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
}

/// Persistence operations the scan needs. Window queries treat both bounds
/// as inclusive (`BETWEEN` semantics); `remove_subscription` is an idempotent
/// no-op when the row is already gone.
#[async_trait]
pub trait NotifierStore: Send + Sync {
    async fn due_tasks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Task>>;

    async fn due_appointments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>>;

    async fn subscription_for(&self, user_id: Uuid) -> Result<Option<PushSubscription>>;

    async fn remove_subscription(&self, user_id: Uuid) -> Result<()>;
}

/// One tick of the due-window scan.
///
/// Collects pending tasks and appointments falling in `[now, now + 15m]`,
/// resolves each owner's push subscription and dispatches one message per
/// item. Returns the number of events processed. A failed window query aborts
/// the whole tick before anything is sent; per-event failures are isolated
/// from each other. The scan never mutates task or appointment state, so the
/// same item is re-announced on every tick until it leaves the window.
pub async fn run_scan<S, P>(store: &S, push: &P, now: DateTime<Utc>) -> Result<usize>
where
    S: NotifierStore,
    P: PushClient,
{
    let horizon = now + Duration::minutes(LOOKAHEAD_MINUTES);

    let tasks = store.due_tasks(now, horizon).await?;
    let appointments = store.due_appointments(now, horizon).await?;

    let events: Vec<NotificationEvent> = tasks
        .into_iter()
        .map(|task| NotificationEvent {
            user_id: task.user_id,
            title: TASK_TITLE.to_string(),
            body: task.description,
        })
        .chain(appointments.into_iter().map(|appointment| NotificationEvent {
            user_id: appointment.user_id,
            title: APPOINTMENT_TITLE.to_string(),
            body: appointment.title,
        }))
        .collect();

    if events.is_empty() {
        return Ok(0);
    }

    let count = events.len();

    // Dispatches run concurrently; the tick awaits them all so the returned
    // count reflects completed processing, but no event can fail another.
    join_all(
        events
            .into_iter()
            .map(|event| dispatch_event(store, push, event)),
    )
    .await;

    Ok(count)
}

async fn dispatch_event<S, P>(store: &S, push: &P, event: NotificationEvent)
where
    S: NotifierStore,
    P: PushClient,
{
    let subscription = match store.subscription_for(event.user_id).await {
        Ok(Some(subscription)) => subscription,
        Ok(None) => {
            tracing::debug!(user_id = %event.user_id, "No push subscription, skipping event");
            return;
        }
        Err(e) => {
            tracing::warn!(user_id = %event.user_id, "Subscription lookup failed: {:?}", e);
            return;
        }
    };

    let payload = PushPayload {
        title: event.title,
        body: event.body,
    };

    match push.send(&subscription, &payload).await {
        PushOutcome::Delivered => {}
        PushOutcome::TransientFailure => {
            tracing::warn!(user_id = %event.user_id, "Push delivery failed, will not retry");
        }
        PushOutcome::SubscriptionGone => {
            tracing::info!(user_id = %event.user_id, "Subscription gone, removing it");
            if let Err(e) = store.remove_subscription(event.user_id).await {
                tracing::warn!(user_id = %event.user_id, "Failed to remove stale subscription: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeStore {
        tasks: Vec<Task>,
        appointments: Vec<Appointment>,
        subscriptions: Mutex<HashMap<Uuid, PushSubscription>>,
        fail_queries: bool,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                tasks: Vec::new(),
                appointments: Vec::new(),
                subscriptions: Mutex::new(HashMap::new()),
                fail_queries: false,
            }
        }

        fn with_subscription(self, user_id: Uuid) -> Self {
            self.subscriptions
                .lock()
                .unwrap()
                .insert(user_id, subscription(user_id));
            self
        }

        fn has_subscription(&self, user_id: Uuid) -> bool {
            self.subscriptions.lock().unwrap().contains_key(&user_id)
        }
    }

    #[async_trait]
    impl NotifierStore for FakeStore {
        async fn due_tasks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Task>> {
            if self.fail_queries {
                return Err(AppError::InternalError);
            }
            Ok(self
                .tasks
                .iter()
                .filter(|t| t.status == "pending" && t.due_date >= start && t.due_date <= end)
                .cloned()
                .collect())
        }

        async fn due_appointments(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<Appointment>> {
            if self.fail_queries {
                return Err(AppError::InternalError);
            }
            Ok(self
                .appointments
                .iter()
                .filter(|a| a.appointment_date >= start && a.appointment_date <= end)
                .cloned()
                .collect())
        }

        async fn subscription_for(&self, user_id: Uuid) -> Result<Option<PushSubscription>> {
            Ok(self.subscriptions.lock().unwrap().get(&user_id).cloned())
        }

        async fn remove_subscription(&self, user_id: Uuid) -> Result<()> {
            self.subscriptions.lock().unwrap().remove(&user_id);
            Ok(())
        }
    }

    struct FakePush {
        outcomes: HashMap<Uuid, PushOutcome>,
        calls: Mutex<Vec<(Uuid, PushPayload)>>,
    }

    impl FakePush {
        fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_outcome(mut self, user_id: Uuid, outcome: PushOutcome) -> Self {
            self.outcomes.insert(user_id, outcome);
            self
        }

        fn calls(&self) -> Vec<(Uuid, PushPayload)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PushClient for FakePush {
        async fn send(
            &self,
            subscription: &PushSubscription,
            payload: &PushPayload,
        ) -> PushOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((subscription.user_id, payload.clone()));
            self.outcomes
                .get(&subscription.user_id)
                .copied()
                .unwrap_or(PushOutcome::Delivered)
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-01-01T10:00:00Z".parse().unwrap()
    }

    fn task(user_id: Uuid, description: &str, due_date: DateTime<Utc>, status: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id,
            description: description.to_string(),
            notes: None,
            due_date,
            status: status.to_string(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn appointment(user_id: Uuid, title: &str, appointment_date: DateTime<Utc>) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            notes: None,
            appointment_date,
            is_important: false,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn subscription(user_id: Uuid) -> PushSubscription {
        PushSubscription {
            id: Uuid::new_v4(),
            user_id,
            endpoint: format!("https://push.example.com/{}", user_id),
            p256dh: "p256dh-key".to_string(),
            auth: "auth-secret".to_string(),
            created_at: now(),
        }
    }

    #[tokio::test]
    async fn pending_task_in_window_is_notified() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        store.tasks.push(task(user, "buy milk", now() + Duration::minutes(10), "pending"));

        let push = FakePush::new();
        let count = run_scan(&store, &push, now()).await.unwrap();

        assert_eq!(count, 1);
        let calls = push.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.title, "Task upcoming");
        assert_eq!(calls[0].1.body, "buy milk");
    }

    #[tokio::test]
    async fn completed_task_is_never_notified() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        store.tasks.push(task(user, "done already", now() + Duration::minutes(5), "completed"));

        let push = FakePush::new();
        let count = run_scan(&store, &push, now()).await.unwrap();

        assert_eq!(count, 0);
        assert!(push.calls().is_empty());
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        // At the lower bound, at the upper bound, and just past each
        store.appointments.push(appointment(user, "right now", now()));
        store.tasks.push(task(user, "at horizon", now() + Duration::minutes(15), "pending"));
        store.tasks.push(task(user, "too late", now() + Duration::minutes(16), "pending"));
        store.appointments.push(appointment(user, "already past", now() - Duration::seconds(1)));

        let push = FakePush::new();
        let count = run_scan(&store, &push, now()).await.unwrap();

        assert_eq!(count, 2);
        let bodies: Vec<String> = push.calls().into_iter().map(|(_, p)| p.body).collect();
        assert!(bodies.contains(&"right now".to_string()));
        assert!(bodies.contains(&"at horizon".to_string()));
        assert!(!bodies.contains(&"too late".to_string()));
        assert!(!bodies.contains(&"already past".to_string()));
    }

    #[tokio::test]
    async fn tasks_and_appointments_are_combined() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        store.tasks.push(task(user, "a task", now() + Duration::minutes(3), "pending"));
        store.appointments.push(appointment(user, "a meeting", now() + Duration::minutes(7)));

        let push = FakePush::new();
        let count = run_scan(&store, &push, now()).await.unwrap();

        assert_eq!(count, 2);
        let titles: Vec<String> = push.calls().into_iter().map(|(_, p)| p.title).collect();
        assert!(titles.contains(&"Task upcoming".to_string()));
        assert!(titles.contains(&"Appointment scheduled".to_string()));
    }

    #[tokio::test]
    async fn missing_subscription_is_skipped_without_affecting_others() {
        let subscribed = Uuid::new_v4();
        let unsubscribed = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(subscribed);
        store.tasks.push(task(unsubscribed, "no receiver", now() + Duration::minutes(2), "pending"));
        store.tasks.push(task(subscribed, "has receiver", now() + Duration::minutes(2), "pending"));

        let push = FakePush::new();
        let count = run_scan(&store, &push, now()).await.unwrap();

        // Both events are processed; only one results in a delivery call
        assert_eq!(count, 2);
        let calls = push.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, subscribed);
    }

    #[tokio::test]
    async fn subscription_gone_removes_the_row() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        store.tasks.push(task(user, "stale endpoint", now() + Duration::minutes(2), "pending"));

        let push = FakePush::new().with_outcome(user, PushOutcome::SubscriptionGone);
        run_scan(&store, &push, now()).await.unwrap();

        assert!(!store.has_subscription(user));
    }

    #[tokio::test]
    async fn rescan_after_subscription_removal_does_not_error() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        store.tasks.push(task(user, "stale endpoint", now() + Duration::minutes(2), "pending"));

        let push = FakePush::new().with_outcome(user, PushOutcome::SubscriptionGone);
        run_scan(&store, &push, now()).await.unwrap();

        // Same window, row already gone: the event is skipped silently
        let count = run_scan(&store, &push, now()).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(push.calls().len(), 1);
    }

    #[tokio::test]
    async fn transient_failure_does_not_stop_other_events() {
        let failing = Uuid::new_v4();
        let ok_a = Uuid::new_v4();
        let ok_b = Uuid::new_v4();
        let mut store = FakeStore::new()
            .with_subscription(failing)
            .with_subscription(ok_a)
            .with_subscription(ok_b);
        store.tasks.push(task(ok_a, "first", now() + Duration::minutes(1), "pending"));
        store.tasks.push(task(failing, "second", now() + Duration::minutes(2), "pending"));
        store.tasks.push(task(ok_b, "third", now() + Duration::minutes(3), "pending"));

        let push = FakePush::new().with_outcome(failing, PushOutcome::TransientFailure);
        let count = run_scan(&store, &push, now()).await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(push.calls().len(), 3);
        // Transient failure leaves the subscription in place
        assert!(store.has_subscription(failing));
    }

    #[tokio::test]
    async fn empty_window_is_a_noop() {
        let store = FakeStore::new();
        let push = FakePush::new();

        let count = run_scan(&store, &push, now()).await.unwrap();

        assert_eq!(count, 0);
        assert!(push.calls().is_empty());
    }

    #[tokio::test]
    async fn query_failure_aborts_the_tick_before_any_dispatch() {
        let user = Uuid::new_v4();
        let mut store = FakeStore::new().with_subscription(user);
        store.tasks.push(task(user, "never sent", now() + Duration::minutes(2), "pending"));
        store.fail_queries = true;

        let push = FakePush::new();
        let result = run_scan(&store, &push, now()).await;

        assert!(result.is_err());
        assert!(push.calls().is_empty());
    }
}
