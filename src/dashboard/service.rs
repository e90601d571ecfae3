use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::try_join;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::expense::models::Expense;
use crate::income::models::Income;
use crate::period;

use super::models::{
    CategoryBreakdownEntry, DashboardSummary, RecentTransaction, TransactionKind, TrendPoint,
};

/// Service layer for the dashboard aggregations. All sums are over
/// `amount` strictly within an inclusive `[start, end]` window and
/// scoped to the authenticated user.
pub struct DashboardService;

impl DashboardService {
    /// Income and expense totals for the current calendar month
    pub async fn summary(pool: &PgPool, user_id: Uuid) -> Result<DashboardSummary, AppError> {
        let (year, month) = period::current_month();
        let (start, end) = period::month_window(year, month)
            .ok_or_else(|| AppError::InternalError("Invalid current month".to_string()))?;

        // The two sums are independent reads
        let (total_income, total_expenses) = try_join!(
            Self::income_sum(pool, user_id, start, end),
            Self::expense_sum(pool, user_id, start, end)
        )?;

        Ok(DashboardSummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            month: period::month_label(year, month),
        })
    }

    /// Most recent `limit` entries across both tables, merged and
    /// re-sorted by date descending
    pub async fn recent_transactions(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentTransaction>, AppError> {
        let incomes = sqlx::query_as::<_, Income>(
            r#"
            SELECT id, user_id, amount, source, date, created_at
            FROM incomes
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool);

        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, amount, category, description, date, created_at
            FROM expenses
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool);

        let (incomes, expenses) =
            try_join!(incomes, expenses).map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(Self::merge_recent(incomes, expenses, limit as usize))
    }

    /// Tag, merge and truncate the two per-table result sets
    pub fn merge_recent(
        incomes: Vec<Income>,
        expenses: Vec<Expense>,
        limit: usize,
    ) -> Vec<RecentTransaction> {
        let mut merged: Vec<RecentTransaction> = incomes
            .into_iter()
            .map(|i| RecentTransaction {
                id: i.id,
                kind: TransactionKind::Income,
                amount: i.amount,
                source: Some(i.source),
                category: None,
                description: None,
                date: i.date,
                created_at: i.created_at,
            })
            .chain(expenses.into_iter().map(|e| RecentTransaction {
                id: e.id,
                kind: TransactionKind::Expense,
                amount: e.amount,
                source: None,
                category: Some(e.category),
                description: Some(e.description),
                date: e.date,
                created_at: e.created_at,
            }))
            .collect();

        merged.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        merged.truncate(limit);
        merged
    }

    /// Current-month expense totals grouped by category, largest first
    pub async fn expense_categories(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CategoryBreakdownEntry>, AppError> {
        let (year, month) = period::current_month();
        let (start, end) = period::month_window(year, month)
            .ok_or_else(|| AppError::InternalError("Invalid current month".to_string()))?;

        Self::category_breakdown(pool, user_id, start, end).await
    }

    /// Expense totals and counts grouped by category within a window,
    /// sorted by total descending. Categories with no rows are absent.
    pub async fn category_breakdown(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategoryBreakdownEntry>, AppError> {
        let rows = sqlx::query_as::<_, (String, Decimal, i64)>(
            r#"
            SELECT category, SUM(amount) AS total, COUNT(*) AS count
            FROM expenses
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            GROUP BY category
            ORDER BY total DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(category, total, count)| CategoryBreakdownEntry {
                category,
                total,
                count,
            })
            .collect())
    }

    /// Income/expense/balance for the trailing `months` calendar months,
    /// ending at the current month. Always exactly `months` entries.
    pub async fn monthly_trend(
        pool: &PgPool,
        user_id: Uuid,
        months: u32,
    ) -> Result<Vec<TrendPoint>, AppError> {
        let (end_year, end_month) = period::current_month();
        let buckets = period::trailing_months(end_year, end_month, months);

        let (first_year, first_month) = buckets[0];
        let (start, _) = period::month_window(first_year, first_month)
            .ok_or_else(|| AppError::InternalError("Invalid trend window".to_string()))?;
        let (_, end) = period::month_window(end_year, end_month)
            .ok_or_else(|| AppError::InternalError("Invalid trend window".to_string()))?;

        let (income_rows, expense_rows) = try_join!(
            Self::monthly_sums(pool, "incomes", user_id, start, end),
            Self::monthly_sums(pool, "expenses", user_id, start, end)
        )?;

        Ok(Self::zip_trend(&buckets, income_rows, expense_rows))
    }

    /// Zero-fill the month sequence against the two sparse grouped
    /// result sets. A bucket present in only one series contributes 0
    /// for the missing one.
    pub fn zip_trend(
        buckets: &[(i32, u32)],
        income_rows: Vec<(i32, i32, Decimal)>,
        expense_rows: Vec<(i32, i32, Decimal)>,
    ) -> Vec<TrendPoint> {
        let income_by_month: HashMap<(i32, u32), Decimal> = income_rows
            .into_iter()
            .map(|(y, m, total)| ((y, m as u32), total))
            .collect();
        let expense_by_month: HashMap<(i32, u32), Decimal> = expense_rows
            .into_iter()
            .map(|(y, m, total)| ((y, m as u32), total))
            .collect();

        buckets
            .iter()
            .map(|&(year, month)| {
                let income = income_by_month
                    .get(&(year, month))
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let expenses = expense_by_month
                    .get(&(year, month))
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                TrendPoint {
                    year,
                    month,
                    month_name: period::short_month_label(year, month),
                    income,
                    expenses,
                    balance: income - expenses,
                }
            })
            .collect()
    }

    pub(crate) async fn income_sum(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal, AppError> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM incomes WHERE user_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    pub(crate) async fn expense_sum(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal, AppError> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE user_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Per-month sums grouped by (year, month) for one table
    pub(crate) async fn monthly_sums(
        pool: &PgPool,
        table: &str,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(i32, i32, Decimal)>, AppError> {
        // `table` is one of two compile-time constants, never user input
        let query = format!(
            r#"
            SELECT EXTRACT(YEAR FROM date)::int AS year,
                   EXTRACT(MONTH FROM date)::int AS month,
                   SUM(amount) AS total
            FROM {table}
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            GROUP BY 1, 2
            ORDER BY 1, 2
            "#
        );

        sqlx::query_as::<_, (i32, i32, Decimal)>(&query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn income(amount: i64, date: DateTime<Utc>) -> Income {
        Income {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: dec(amount),
            source: "Salary".to_string(),
            date,
            created_at: date,
        }
    }

    fn expense(amount: i64, date: DateTime<Utc>) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: dec(amount),
            category: "Food & Dining".to_string(),
            description: String::new(),
            date,
            created_at: date,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_merge_recent_orders_by_date_descending() {
        let incomes = vec![income(100, day(1)), income(200, day(10))];
        let expenses = vec![expense(50, day(5)), expense(30, day(12))];

        let merged = DashboardService::merge_recent(incomes, expenses, 10);

        let dates: Vec<u32> = merged.iter().map(|t| t.date.day()).collect();
        assert_eq!(dates, vec![12, 10, 5, 1]);
        assert_eq!(merged[0].kind, TransactionKind::Expense);
        assert_eq!(merged[1].kind, TransactionKind::Income);
    }

    #[test]
    fn test_merge_recent_truncates_to_limit() {
        let incomes = (1..=5).map(|d| income(100, day(d))).collect();
        let expenses = (6..=10).map(|d| expense(50, day(d))).collect();

        let merged = DashboardService::merge_recent(incomes, expenses, 3);

        assert_eq!(merged.len(), 3);
        let dates: Vec<u32> = merged.iter().map(|t| t.date.day()).collect();
        assert_eq!(dates, vec![10, 9, 8]);
    }

    #[test]
    fn test_merge_recent_tags_entries() {
        let merged =
            DashboardService::merge_recent(vec![income(100, day(1))], vec![expense(50, day(2))], 10);

        let income_entry = merged
            .iter()
            .find(|t| t.kind == TransactionKind::Income)
            .unwrap();
        assert_eq!(income_entry.source.as_deref(), Some("Salary"));
        assert!(income_entry.category.is_none());

        let expense_entry = merged
            .iter()
            .find(|t| t.kind == TransactionKind::Expense)
            .unwrap();
        assert_eq!(expense_entry.category.as_deref(), Some("Food & Dining"));
        assert!(expense_entry.source.is_none());
    }

    #[test]
    fn test_zip_trend_zero_fills_missing_months() {
        let buckets = period::trailing_months(2024, 3, 3); // Jan..Mar 2024
        let income_rows = vec![(2024, 2, dec(500))];
        let expense_rows = vec![(2024, 3, dec(200))];

        let trend = DashboardService::zip_trend(&buckets, income_rows, expense_rows);

        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].month, 1);
        assert_eq!(trend[0].income, Decimal::ZERO);
        assert_eq!(trend[0].expenses, Decimal::ZERO);
        assert_eq!(trend[1].income, dec(500));
        assert_eq!(trend[1].balance, dec(500));
        assert_eq!(trend[2].expenses, dec(200));
        assert_eq!(trend[2].balance, dec(-200));
    }

    #[test]
    fn test_zip_trend_chronological_across_years() {
        let buckets = period::trailing_months(2024, 1, 3); // Nov 2023..Jan 2024
        let trend = DashboardService::zip_trend(&buckets, vec![], vec![]);

        assert_eq!(
            trend
                .iter()
                .map(|p| (p.year, p.month))
                .collect::<Vec<_>>(),
            vec![(2023, 11), (2023, 12), (2024, 1)]
        );
        assert!(trend.iter().all(|p| p.income == Decimal::ZERO));
    }

    #[test]
    fn test_zip_trend_uses_compact_month_labels() {
        let buckets = vec![(2023, 12), (2024, 3)];
        let trend = DashboardService::zip_trend(&buckets, vec![], vec![]);
        assert_eq!(trend[0].month_name, "Dec 2023");
        assert_eq!(trend[1].month_name, "Mar 2024");
    }
}
