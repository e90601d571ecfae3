use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Validate that amount is strictly positive
pub fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive"));
    }
    Ok(())
}

/// Database model for income records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Income {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub source: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Income record returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResponse {
    pub id: Uuid,
    /// Owning user (always the authenticated caller)
    pub user_id: Uuid,
    #[schema(example = 2500.00)]
    pub amount: Decimal,
    #[schema(example = "Salary")]
    pub source: String,
    /// Transaction date
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Income> for IncomeResponse {
    fn from(i: Income) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            amount: i.amount,
            source: i.source,
            date: i.date,
            created_at: i.created_at,
        }
    }
}

/// Request body for creating or replacing an income record
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IncomeDto {
    /// Income amount (must be greater than 0)
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be greater than 0"
    ))]
    #[schema(example = 2500.00)]
    pub amount: Decimal,

    /// Where the money came from (1-100 characters)
    #[validate(length(
        min = 1,
        max = 100,
        message = "Source is required and must be less than 100 characters"
    ))]
    #[schema(example = "Salary")]
    pub source: String,

    /// Calendar date of the transaction
    #[schema(example = "2024-03-05")]
    pub date: NaiveDate,
}

/// Query parameters for listing incomes
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct IncomeFilters {
    /// Calendar month to filter by (requires year)
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[param(example = 3)]
    pub month: Option<u32>,

    /// Calendar year to filter by (requires month)
    #[validate(range(min = 1970, max = 9999, message = "Year is out of range"))]
    #[param(example = 2024)]
    pub year: Option<i32>,

    /// Maximum results (1-100)
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    #[param(example = 50)]
    pub limit: i64,
}

pub fn default_limit() -> i64 {
    50
}

/// Response for income lists: the page plus the sum over the whole
/// filtered set
#[derive(Debug, Serialize, ToSchema)]
pub struct IncomeListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<IncomeResponse>,
    /// SUM(amount) over every record matching the filter, not just the page
    #[schema(example = 5000.00)]
    pub total: Decimal,
    /// Number of returned records
    #[schema(example = 2)]
    pub count: usize,
}

/// Path parameters for income ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct IncomeIdPath {
    /// Income UUID
    pub id: Uuid,
}
