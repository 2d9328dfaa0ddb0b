use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::grocery_models::GroceryItem;

#[derive(Clone)]
pub struct GroceryRepository {
    pool: PgPool,
}

impl GroceryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, user_id: Uuid, category: Option<&str>) -> Result<Vec<GroceryItem>> {
        let items = match category {
            Some(category) => {
                sqlx::query_as::<_, GroceryItem>(
                    "SELECT * FROM grocery_items
                     WHERE user_id = $1 AND category = $2
                     ORDER BY created_at ASC",
                )
                .bind(user_id)
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, GroceryItem>(
                    "SELECT * FROM grocery_items WHERE user_id = $1 ORDER BY created_at ASC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(items)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        quantity: Option<&str>,
        category: &str,
    ) -> Result<GroceryItem> {
        let item = sqlx::query_as::<_, GroceryItem>(
            "INSERT INTO grocery_items (user_id, name, quantity, category)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .bind(quantity)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: Option<&str>,
        quantity: Option<&str>,
        category: Option<&str>,
        is_checked: Option<bool>,
    ) -> Result<Option<GroceryItem>> {
        let item = sqlx::query_as::<_, GroceryItem>(
            "UPDATE grocery_items SET
                name = COALESCE($1, name),
                quantity = COALESCE($2, quantity),
                category = COALESCE($3, category),
                is_checked = COALESCE($4, is_checked)
             WHERE id = $5 AND user_id = $6
             RETURNING *",
        )
        .bind(name)
        .bind(quantity)
        .bind(category)
        .bind(is_checked)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM grocery_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
