use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::period;

use super::models::{Expense, ExpenseDto, ExpenseFilters};

/// Service layer for expense records. Every query is scoped to the
/// owning user.
pub struct ExpenseService;

impl ExpenseService {
    /// Build the inclusive date window from a month+year filter.
    /// Providing only one of the pair is a validation error.
    pub fn filter_window(
        filters: &ExpenseFilters,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>, AppError> {
        match (filters.month, filters.year) {
            (Some(month), Some(year)) => period::month_window(year, month)
                .map(Some)
                .ok_or_else(|| AppError::ValidationError("Invalid month or year".to_string())),
            (None, None) => Ok(None),
            _ => Err(AppError::ValidationError(
                "Month and year must be provided together".to_string(),
            )),
        }
    }

    /// Create an expense record owned by the authenticated user
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        dto: &ExpenseDto,
    ) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, amount, category, description, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, amount, category, description, date, created_at
            "#,
        )
        .bind(user_id)
        .bind(dto.amount)
        .bind(dto.category.as_str())
        .bind(dto.description.as_deref().unwrap_or(""))
        .bind(period::start_of_day(dto.date))
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// List expenses newest-first, plus SUM(amount) over the entire
    /// filtered set (not just the returned page)
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        filters: &ExpenseFilters,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<(Vec<Expense>, Decimal), AppError> {
        let (start, end) = match window {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };
        let category = filters.category.map(|c| c.as_str());

        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, amount, category, description, date, created_at
            FROM expenses
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
              AND ($4::text IS NULL OR category = $4)
            ORDER BY date DESC, created_at DESC
            LIMIT $5
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .bind(category)
        .bind(filters.limit)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
              AND ($4::text IS NULL OR category = $4)
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .bind(category)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok((expenses, total))
    }

    /// Get a single expense record owned by the caller
    pub async fn get(pool: &PgPool, user_id: Uuid, expense_id: Uuid) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, amount, category, description, date, created_at
            FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(expense_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
    }

    /// Replace an expense record owned by the caller
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        expense_id: Uuid,
        dto: &ExpenseDto,
    ) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET amount = $1, category = $2, description = $3, date = $4
            WHERE id = $5 AND user_id = $6
            RETURNING id, user_id, amount, category, description, date, created_at
            "#,
        )
        .bind(dto.amount)
        .bind(dto.category.as_str())
        .bind(dto.description.as_deref().unwrap_or(""))
        .bind(period::start_of_day(dto.date))
        .bind(expense_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
    }

    /// Delete an expense record owned by the caller
    pub async fn delete(pool: &PgPool, user_id: Uuid, expense_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(expense_id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense not found".to_string()));
        }

        Ok(())
    }
}
