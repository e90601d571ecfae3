use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dashboard::models::CategoryBreakdownEntry;

/// Income and expense sums for a single day of the month
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct DailyPoint {
    /// Day of month (1-based)
    #[schema(example = 5)]
    pub day: u32,
    #[schema(example = 0.00)]
    pub income: Decimal,
    #[schema(example = 50.00)]
    pub expenses: Decimal,
}

/// The month a period report covers
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInfo {
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = "March 2024")]
    pub month_name: String,
}

/// Report for one calendar month: daily series, category breakdown and
/// period totals
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    /// One entry per day of the month, zero-filled
    pub monthly_data: Vec<DailyPoint>,
    /// Expense totals per category, largest first
    pub category_data: Vec<CategoryBreakdownEntry>,
    #[schema(example = 2500.00)]
    pub total_income: Decimal,
    #[schema(example = 1800.00)]
    pub total_expenses: Decimal,
    #[schema(example = 700.00)]
    pub balance: Decimal,
    pub period: PeriodInfo,
}

/// One calendar month in the yearly series
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportEntry {
    /// Month number (1 = January)
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = "March")]
    pub month_name: String,
    #[schema(example = 2500.00)]
    pub income: Decimal,
    #[schema(example = 1800.00)]
    pub expenses: Decimal,
    #[schema(example = 700.00)]
    pub balance: Decimal,
}

/// Twelve-month report with yearly totals and fixed /12 averages
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    #[schema(example = 2024)]
    pub year: i32,
    /// Always exactly 12 entries, January through December
    pub monthly_data: Vec<MonthlyReportEntry>,
    #[schema(example = 30000.00)]
    pub total_income: Decimal,
    #[schema(example = 21600.00)]
    pub total_expenses: Decimal,
    #[schema(example = 8400.00)]
    pub total_balance: Decimal,
    /// Yearly total divided by 12, even for partial years
    #[schema(example = 2500.00)]
    pub average_monthly_income: Decimal,
    /// Yearly total divided by 12, even for partial years
    #[schema(example = 1800.00)]
    pub average_monthly_expenses: Decimal,
}

/// Query parameters for the period report (defaults to the current month)
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct PeriodQuery {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[param(example = 3)]
    pub month: Option<u32>,

    #[validate(range(min = 1970, max = 9999, message = "Year is out of range"))]
    #[param(example = 2024)]
    pub year: Option<i32>,
}

/// Query parameters for the yearly report (defaults to the current year)
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct YearlyQuery {
    #[validate(range(min = 1970, max = 9999, message = "Year is out of range"))]
    #[param(example = 2024)]
    pub year: Option<i32>,
}
