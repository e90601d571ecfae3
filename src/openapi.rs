use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::models::{AuthResponse, LoginDto, RegisterDto, UserSummary, VerifyResponse};
use crate::dashboard::models::{
    CategoryBreakdownEntry, DashboardSummary, RecentTransaction, TransactionKind, TrendPoint,
};
use crate::errors::ErrorResponse;
use crate::expense::models::{Category, ExpenseDto, ExpenseListResponse, ExpenseResponse};
use crate::income::models::{IncomeDto, IncomeListResponse, IncomeResponse};
use crate::reports::models::{
    DailyPoint, MonthlyReportEntry, PeriodInfo, PeriodReport, YearlyReport,
};
use crate::responses::MessageResponse;
use crate::user::models::{ChangePasswordDto, DeleteAccountDto, UpdateProfileDto};

/// Security scheme modifier for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT access token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FinTrack API",
        version = "1.0.0",
        description = "RESTful API for personal income and expense tracking",
        contact(
            name = "API Support",
            email = "support@example.com"
        ),
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Authentication"),
        (name = "Income", description = "Income record management"),
        (name = "Expense", description = "Expense record management"),
        (name = "Dashboard", description = "Current-month summaries and trends"),
        (name = "Reports", description = "Period and yearly reports"),
        (name = "User", description = "Profile and account management")
    ),
    paths(
        // Auth endpoints
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::verify,
        // Income endpoints
        crate::income::handlers::create_income,
        crate::income::handlers::list_incomes,
        crate::income::handlers::get_income,
        crate::income::handlers::update_income,
        crate::income::handlers::delete_income,
        // Expense endpoints
        crate::expense::handlers::create_expense,
        crate::expense::handlers::list_expenses,
        crate::expense::handlers::get_expense,
        crate::expense::handlers::update_expense,
        crate::expense::handlers::delete_expense,
        // Dashboard endpoints
        crate::dashboard::handlers::summary,
        crate::dashboard::handlers::recent_transactions,
        crate::dashboard::handlers::expense_categories,
        crate::dashboard::handlers::monthly_trend,
        // Report endpoints
        crate::reports::handlers::period_report,
        crate::reports::handlers::yearly_report,
        // User endpoints
        crate::user::handlers::get_profile,
        crate::user::handlers::update_profile,
        crate::user::handlers::change_password,
        crate::user::handlers::delete_account,
    ),
    components(
        schemas(
            // Error response
            ErrorResponse,
            // Auth schemas
            RegisterDto,
            LoginDto,
            UserSummary,
            AuthResponse,
            VerifyResponse,
            // Income schemas
            IncomeDto,
            IncomeResponse,
            IncomeListResponse,
            // Expense schemas
            Category,
            ExpenseDto,
            ExpenseResponse,
            ExpenseListResponse,
            // Dashboard schemas
            DashboardSummary,
            TransactionKind,
            RecentTransaction,
            CategoryBreakdownEntry,
            TrendPoint,
            // Report schemas
            DailyPoint,
            PeriodInfo,
            PeriodReport,
            MonthlyReportEntry,
            YearlyReport,
            // User schemas
            UpdateProfileDto,
            ChangePasswordDto,
            DeleteAccountDto,
            // Shared envelopes
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
