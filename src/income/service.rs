use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::period;

use super::models::{Income, IncomeDto, IncomeFilters};

/// Service layer for income records. Every query is scoped to the
/// owning user.
pub struct IncomeService;

impl IncomeService {
    /// Build the inclusive date window from a month+year filter.
    /// Providing only one of the pair is a validation error.
    pub fn filter_window(
        filters: &IncomeFilters,
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

    /// Create an income record owned by the authenticated user
    pub async fn create(pool: &PgPool, user_id: Uuid, dto: &IncomeDto) -> Result<Income, AppError> {
        sqlx::query_as::<_, Income>(
            r#"
            INSERT INTO incomes (user_id, amount, source, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, amount, source, date, created_at
            "#,
        )
        .bind(user_id)
        .bind(dto.amount)
        .bind(dto.source.trim())
        .bind(period::start_of_day(dto.date))
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// List incomes newest-first, plus SUM(amount) over the entire
    /// filtered set (not just the returned page)
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: i64,
    ) -> Result<(Vec<Income>, Decimal), AppError> {
        let (start, end) = match window {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        let incomes = sqlx::query_as::<_, Income>(
            r#"
            SELECT id, user_id, amount, source, date, created_at
            FROM incomes
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
            ORDER BY date DESC, created_at DESC
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM incomes
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok((incomes, total))
    }

    /// Get a single income record owned by the caller
    pub async fn get(pool: &PgPool, user_id: Uuid, income_id: Uuid) -> Result<Income, AppError> {
        sqlx::query_as::<_, Income>(
            r#"
            SELECT id, user_id, amount, source, date, created_at
            FROM incomes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(income_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Income not found".to_string()))
    }

    /// Replace an income record owned by the caller
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        income_id: Uuid,
        dto: &IncomeDto,
    ) -> Result<Income, AppError> {
        sqlx::query_as::<_, Income>(
            r#"
            UPDATE incomes
            SET amount = $1, source = $2, date = $3
            WHERE id = $4 AND user_id = $5
            RETURNING id, user_id, amount, source, date, created_at
            "#,
        )
        .bind(dto.amount)
        .bind(dto.source.trim())
        .bind(period::start_of_day(dto.date))
        .bind(income_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Income not found".to_string()))
    }

    /// Delete an income record owned by the caller
    pub async fn delete(pool: &PgPool, user_id: Uuid, income_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM incomes WHERE id = $1 AND user_id = $2")
            .bind(income_id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Income not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::models::default_limit;

    fn filters(month: Option<u32>, year: Option<i32>) -> IncomeFilters {
        IncomeFilters {
            month,
            year,
            limit: default_limit(),
        }
    }

    #[test]
    fn test_filter_window_none() {
        let window = IncomeService::filter_window(&filters(None, None)).expect("no filter is ok");
        assert!(window.is_none());
    }

    #[test]
    fn test_filter_window_full_month() {
        let window = IncomeService::filter_window(&filters(Some(3), Some(2024)))
            .expect("valid pair")
            .expect("window present");
        assert_eq!(window.0.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(window.1.to_rfc3339(), "2024-03-31T23:59:59+00:00");
    }

    #[test]
    fn test_filter_window_month_without_year() {
        assert!(IncomeService::filter_window(&filters(Some(3), None)).is_err());
        assert!(IncomeService::filter_window(&filters(None, Some(2024))).is_err());
    }
}
