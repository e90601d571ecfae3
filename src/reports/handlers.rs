use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;
use crate::period;
use crate::responses::DataResponse;

use super::models::{PeriodQuery, PeriodReport, YearlyQuery, YearlyReport};
use super::service::ReportService;

/// GET /reports - Full report for one calendar month
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Daily series, category breakdown and totals", body = DataResponse<PeriodReport>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/reports")]
pub async fn period_report(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (current_year, current_month) = period::current_month();
    let month = query.month.unwrap_or(current_month);
    let year = query.year.unwrap_or(current_year);

    let report = ReportService::period_report(pool.get_ref(), auth.user_id, month, year).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(report)))
}

/// GET /reports/yearly - Twelve-month report with totals and averages
#[utoipa::path(
    get,
    path = "/reports/yearly",
    tag = "Reports",
    params(YearlyQuery),
    responses(
        (status = 200, description = "Monthly series with yearly totals and averages", body = DataResponse<YearlyReport>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/reports/yearly")]
pub async fn yearly_report(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<YearlyQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let year = query.year.unwrap_or_else(|| period::current_month().0);

    let report = ReportService::yearly_report(pool.get_ref(), auth.user_id, year).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(report)))
}
