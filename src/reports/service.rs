use futures::try_join;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dashboard::service::DashboardService;
use crate::errors::AppError;
use crate::period;

use super::models::{DailyPoint, MonthlyReportEntry, PeriodInfo, PeriodReport, YearlyReport};

/// Service layer for period and yearly reports
pub struct ReportService;

impl ReportService {
    /// Full report for one calendar month: per-day series, category
    /// breakdown and totals
    pub async fn period_report(
        pool: &PgPool,
        user_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<PeriodReport, AppError> {
        let (start, end) = period::month_window(year, month)
            .ok_or_else(|| AppError::ValidationError("Invalid month or year".to_string()))?;
        let days = period::days_in_month(year, month)
            .ok_or_else(|| AppError::ValidationError("Invalid month or year".to_string()))?;

        let (income_days, expense_days, category_data, total_income, total_expenses) = try_join!(
            Self::daily_sums(pool, "incomes", user_id, start, end),
            Self::daily_sums(pool, "expenses", user_id, start, end),
            DashboardService::category_breakdown(pool, user_id, start, end),
            DashboardService::income_sum(pool, user_id, start, end),
            DashboardService::expense_sum(pool, user_id, start, end)
        )?;

        Ok(PeriodReport {
            monthly_data: Self::build_daily_series(days, income_days, expense_days),
            category_data,
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            period: PeriodInfo {
                month,
                year,
                month_name: period::month_label(year, month),
            },
        })
    }

    /// Zero-fill the day sequence `1..=days` against the two sparse
    /// grouped result sets
    pub fn build_daily_series(
        days: u32,
        income_days: Vec<(i32, Decimal)>,
        expense_days: Vec<(i32, Decimal)>,
    ) -> Vec<DailyPoint> {
        (1..=days)
            .map(|day| {
                let income = income_days
                    .iter()
                    .find(|(d, _)| *d == day as i32)
                    .map(|(_, total)| *total)
                    .unwrap_or(Decimal::ZERO);
                let expenses = expense_days
                    .iter()
                    .find(|(d, _)| *d == day as i32)
                    .map(|(_, total)| *total)
                    .unwrap_or(Decimal::ZERO);
                DailyPoint {
                    day,
                    income,
                    expenses,
                }
            })
            .collect()
    }

    /// Twelve-month report with yearly totals and fixed /12 averages
    pub async fn yearly_report(
        pool: &PgPool,
        user_id: Uuid,
        year: i32,
    ) -> Result<YearlyReport, AppError> {
        let (start, end) = period::year_window(year)
            .ok_or_else(|| AppError::ValidationError("Invalid year".to_string()))?;

        let (income_rows, expense_rows) = try_join!(
            DashboardService::monthly_sums(pool, "incomes", user_id, start, end),
            DashboardService::monthly_sums(pool, "expenses", user_id, start, end)
        )?;

        Ok(Self::build_yearly_report(year, income_rows, expense_rows))
    }

    /// Build the January..December series and derive totals and
    /// averages from it. Averages always divide by 12, never by the
    /// number of months with data, so a partial year understates the
    /// true monthly average.
    pub fn build_yearly_report(
        year: i32,
        income_rows: Vec<(i32, i32, Decimal)>,
        expense_rows: Vec<(i32, i32, Decimal)>,
    ) -> YearlyReport {
        let monthly_data: Vec<MonthlyReportEntry> = (1..=12u32)
            .map(|month| {
                let income = income_rows
                    .iter()
                    .find(|(y, m, _)| *y == year && *m == month as i32)
                    .map(|(_, _, total)| *total)
                    .unwrap_or(Decimal::ZERO);
                let expenses = expense_rows
                    .iter()
                    .find(|(y, m, _)| *y == year && *m == month as i32)
                    .map(|(_, _, total)| *total)
                    .unwrap_or(Decimal::ZERO);
                MonthlyReportEntry {
                    month,
                    month_name: period::month_name(month).to_string(),
                    income,
                    expenses,
                    balance: income - expenses,
                }
            })
            .collect();

        let total_income: Decimal = monthly_data.iter().map(|m| m.income).sum();
        let total_expenses: Decimal = monthly_data.iter().map(|m| m.expenses).sum();
        let twelve = Decimal::from(12);

        YearlyReport {
            year,
            monthly_data,
            total_income,
            total_expenses,
            total_balance: total_income - total_expenses,
            average_monthly_income: total_income / twelve,
            average_monthly_expenses: total_expenses / twelve,
        }
    }

    /// Per-day-of-month sums for one table
    async fn daily_sums(
        pool: &PgPool,
        table: &str,
        user_id: Uuid,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<(i32, Decimal)>, AppError> {
        // `table` is one of two compile-time constants, never user input
        let query = format!(
            r#"
            SELECT EXTRACT(DAY FROM date)::int AS day,
                   SUM(amount) AS total
            FROM {table}
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            GROUP BY 1
            ORDER BY 1
            "#
        );

        sqlx::query_as::<_, (i32, Decimal)>(&query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}
