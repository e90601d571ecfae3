use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Current-month totals for the dashboard header
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = 2500.00)]
    pub total_income: Decimal,
    #[schema(example = 1800.00)]
    pub total_expenses: Decimal,
    #[schema(example = 700.00)]
    pub balance: Decimal,
    /// Label for the summarized month
    #[schema(example = "March 2024")]
    pub month: String,
}

/// Whether a merged entry came from the income or expense table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// One entry in the merged recent-activity feed
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: Uuid,
    /// "income" or "expense"
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[schema(example = 50.00)]
    pub amount: Decimal,
    /// Income source (income entries only)
    #[schema(example = "Salary")]
    pub source: Option<String>,
    /// Expense category (expense entries only)
    #[schema(example = "Food & Dining")]
    pub category: Option<String>,
    /// Expense description (expense entries only)
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Per-category expense totals
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct CategoryBreakdownEntry {
    #[schema(example = "Food & Dining")]
    pub category: String,
    #[schema(example = 80.00)]
    pub total: Decimal,
    /// Number of expense records in the category
    #[schema(example = 2)]
    pub count: i64,
}

/// One month in the trailing trend series
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = "Mar 2024")]
    pub month_name: String,
    #[schema(example = 2500.00)]
    pub income: Decimal,
    #[schema(example = 1800.00)]
    pub expenses: Decimal,
    #[schema(example = 700.00)]
    pub balance: Decimal,
}

/// Query parameters for the recent-activity feed
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct RecentQuery {
    /// Maximum merged entries (1-50)
    #[validate(range(min = 1, max = 50))]
    #[serde(default = "default_recent_limit")]
    #[param(example = 10)]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    10
}

/// Query parameters for the monthly trend
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct TrendQuery {
    /// Number of trailing months including the current one (1-60)
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_trend_months")]
    #[param(example = 6)]
    pub months: u32,
}

fn default_trend_months() -> u32 {
    6
}
