use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::finance_dto::FinanceFilters;
use super::finance_models::{CategoryTotal, FinanceSummary, Transaction};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, user_id: Uuid, filters: &FinanceFilters) -> Result<Vec<Transaction>> {
        let mut query = "SELECT * FROM finances WHERE user_id = $1".to_string();
        let mut params_count = 1;

        if filters.category.is_some() {
            params_count += 1;
            query.push_str(&format!(" AND category = ${}", params_count));
        }

        if filters.year.is_some() {
            params_count += 1;
            query.push_str(&format!(
                " AND EXTRACT(YEAR FROM transaction_date)::int = ${}",
                params_count
            ));
        }

        if filters.month.is_some() {
            params_count += 1;
            query.push_str(&format!(
                " AND EXTRACT(MONTH FROM transaction_date)::int = ${}",
                params_count
            ));
        }

        query.push_str(" ORDER BY transaction_date DESC");

        let mut db_query = sqlx::query_as::<_, Transaction>(&query).bind(user_id);

        if let Some(ref category) = filters.category {
            db_query = db_query.bind(category);
        }

        if let Some(year) = filters.year {
            db_query = db_query.bind(year);
        }

        if let Some(month) = filters.month {
            db_query = db_query.bind(month as i32);
        }

        let transactions = db_query.fetch_all(&self.pool).await?;
        Ok(transactions)
    }

    /// Total spend and per-category breakdown, restricted by month/year.
    /// The category filter does not apply here; the breakdown already
    /// separates categories.
    pub async fn summary(&self, user_id: Uuid, filters: &FinanceFilters) -> Result<FinanceSummary> {
        let mut base = " FROM finances WHERE user_id = $1".to_string();
        let mut params_count = 1;

        if filters.year.is_some() {
            params_count += 1;
            base.push_str(&format!(
                " AND EXTRACT(YEAR FROM transaction_date)::int = ${}",
                params_count
            ));
        }

        if filters.month.is_some() {
            params_count += 1;
            base.push_str(&format!(
                " AND EXTRACT(MONTH FROM transaction_date)::int = ${}",
                params_count
            ));
        }

        let total_query = format!("SELECT COALESCE(SUM(amount), 0){}", base);
        let mut total_q = sqlx::query_scalar::<_, f64>(&total_query).bind(user_id);

        if let Some(year) = filters.year {
            total_q = total_q.bind(year);
        }
        if let Some(month) = filters.month {
            total_q = total_q.bind(month as i32);
        }

        let total = total_q.fetch_one(&self.pool).await?;

        let by_category_query = format!(
            "SELECT category, SUM(amount) AS total{} GROUP BY category",
            base
        );
        let mut by_category_q =
            sqlx::query_as::<_, CategoryTotal>(&by_category_query).bind(user_id);

        if let Some(year) = filters.year {
            by_category_q = by_category_q.bind(year);
        }
        if let Some(month) = filters.month {
            by_category_q = by_category_q.bind(month as i32);
        }

        let by_category = by_category_q.fetch_all(&self.pool).await?;

        Ok(FinanceSummary { total, by_category })
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        amount: f64,
        category: &str,
        transaction_date: DateTime<Utc>,
    ) -> Result<Transaction> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "INSERT INTO finances (user_id, name, amount, category, transaction_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .bind(amount)
        .bind(category)
        .bind(transaction_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: Option<&str>,
        amount: Option<f64>,
        category: Option<&str>,
        transaction_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "UPDATE finances SET
                name = COALESCE($1, name),
                amount = COALESCE($2, amount),
                category = COALESCE($3, category),
                transaction_date = COALESCE($4, transaction_date)
             WHERE id = $5 AND user_id = $6
             RETURNING *",
        )
        .bind(name)
        .bind(amount)
        .bind(category)
        .bind(transaction_date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM finances WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
