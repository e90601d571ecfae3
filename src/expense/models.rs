use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::income::models::validate_positive_amount;

/// Closed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Housing & Rent")]
    HousingAndRent,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Savings")]
    Savings,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::HousingAndRent => "Housing & Rent",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Food & Dining" => Some(Category::FoodAndDining),
            "Transportation" => Some(Category::Transportation),
            "Housing & Rent" => Some(Category::HousingAndRent),
            "Utilities" => Some(Category::Utilities),
            "Healthcare" => Some(Category::Healthcare),
            "Entertainment" => Some(Category::Entertainment),
            "Shopping" => Some(Category::Shopping),
            "Education" => Some(Category::Education),
            "Savings" => Some(Category::Savings),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Database model for expense records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Expense record returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: Uuid,
    /// Owning user (always the authenticated caller)
    pub user_id: Uuid,
    #[schema(example = 50.00)]
    pub amount: Decimal,
    #[schema(example = "Food & Dining")]
    pub category: String,
    #[schema(example = "Weekly groceries")]
    pub description: String,
    /// Transaction date
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            amount: e.amount,
            category: e.category,
            description: e.description,
            date: e.date,
            created_at: e.created_at,
        }
    }
}

/// Request body for creating or replacing an expense record
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExpenseDto {
    /// Expense amount (must be greater than 0)
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be greater than 0"
    ))]
    #[schema(example = 50.00)]
    pub amount: Decimal,

    /// One of the fixed expense categories
    pub category: Category,

    /// Optional description (max 200 characters)
    #[validate(length(max = 200, message = "Description cannot exceed 200 characters"))]
    #[schema(example = "Weekly groceries")]
    pub description: Option<String>,

    /// Calendar date of the transaction
    #[schema(example = "2024-03-05")]
    pub date: NaiveDate,
}

/// Query parameters for listing expenses
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ExpenseFilters {
    /// Calendar month to filter by (requires year)
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[param(example = 3)]
    pub month: Option<u32>,

    /// Calendar year to filter by (requires month)
    #[validate(range(min = 1970, max = 9999, message = "Year is out of range"))]
    #[param(example = 2024)]
    pub year: Option<i32>,

    /// Filter by category
    #[param(example = "Food & Dining")]
    pub category: Option<Category>,

    /// Maximum results (1-100)
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    #[param(example = 50)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Response for expense lists: the page plus the sum over the whole
/// filtered set
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<ExpenseResponse>,
    /// SUM(amount) over every record matching the filter, not just the page
    #[schema(example = 80.00)]
    pub total: Decimal,
    /// Number of returned records
    #[schema(example = 2)]
    pub count: usize,
}

/// Path parameters for expense ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpenseIdPath {
    /// Expense UUID
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATEGORIES: [Category; 10] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::HousingAndRent,
        Category::Utilities,
        Category::Healthcare,
        Category::Entertainment,
        Category::Shopping,
        Category::Education,
        Category::Savings,
        Category::Other,
    ];

    #[test]
    fn test_category_round_trip() {
        for category in ALL_CATEGORIES {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert_eq!(Category::parse("Groceries"), None);
        assert_eq!(Category::parse("food & dining"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_category_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");

        let parsed: Category = serde_json::from_str("\"Housing & Rent\"").unwrap();
        assert_eq!(parsed, Category::HousingAndRent);
    }

    #[test]
    fn test_category_serde_rejects_unknown() {
        let result: Result<Category, _> = serde_json::from_str("\"Subscriptions\"");
        assert!(result.is_err());
    }
}
