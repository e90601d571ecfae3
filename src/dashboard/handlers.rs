use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;
use crate::responses::DataResponse;

use super::models::{
    CategoryBreakdownEntry, DashboardSummary, RecentQuery, RecentTransaction, TrendPoint,
    TrendQuery,
};
use super::service::DashboardService;

/// GET /dashboard/summary - Current-month totals
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Current-month totals", body = DataResponse<DashboardSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/dashboard/summary")]
pub async fn summary(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let summary = DashboardService::summary(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(summary)))
}

/// GET /dashboard/recent-transactions - Merged recent activity
#[utoipa::path(
    get,
    path = "/dashboard/recent-transactions",
    tag = "Dashboard",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent transactions, newest first", body = DataResponse<Vec<RecentTransaction>>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/dashboard/recent-transactions")]
pub async fn recent_transactions(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let transactions =
        DashboardService::recent_transactions(pool.get_ref(), auth.user_id, query.limit).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(transactions)))
}

/// GET /dashboard/expense-categories - Current-month category breakdown
#[utoipa::path(
    get,
    path = "/dashboard/expense-categories",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Per-category totals, largest first", body = DataResponse<Vec<CategoryBreakdownEntry>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/dashboard/expense-categories")]
pub async fn expense_categories(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let breakdown = DashboardService::expense_categories(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(breakdown)))
}

/// GET /dashboard/monthly-trend - Trailing months, zero-filled
#[utoipa::path(
    get,
    path = "/dashboard/monthly-trend",
    tag = "Dashboard",
    params(TrendQuery),
    responses(
        (status = 200, description = "Exactly `months` entries in chronological order", body = DataResponse<Vec<TrendPoint>>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/dashboard/monthly-trend")]
pub async fn monthly_trend(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let trend = DashboardService::monthly_trend(pool.get_ref(), auth.user_id, query.months).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(trend)))
}
