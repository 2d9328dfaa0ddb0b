use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::subscription_models::PushSubscription;

#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a subscription, replacing any earlier ones for the same user.
    /// Delete-then-insert inside one transaction keeps the one-row-per-user
    /// invariant even under concurrent subscribe calls.
    pub async fn replace(
        &self,
        user_id: Uuid,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> Result<PushSubscription> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM push_subscriptions WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let subscription = sqlx::query_as::<_, PushSubscription>(
            "INSERT INTO push_subscriptions (user_id, endpoint, p256dh, auth)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(user_id)
        .bind(endpoint)
        .bind(p256dh)
        .bind(auth)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(subscription)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<PushSubscription>> {
        let subscription = sqlx::query_as::<_, PushSubscription>(
            "SELECT * FROM push_subscriptions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    /// Idempotent: deleting an already-removed subscription is a no-op.
    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
