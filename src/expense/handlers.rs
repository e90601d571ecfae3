use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;
use crate::responses::{DataResponse, MessageResponse, MutationResponse};

use super::models::{
    ExpenseDto, ExpenseFilters, ExpenseIdPath, ExpenseListResponse, ExpenseResponse,
};
use super::service::ExpenseService;

/// POST /expense - Record an expense
#[utoipa::path(
    post,
    path = "/expense",
    tag = "Expense",
    request_body = ExpenseDto,
    responses(
        (status = 201, description = "Expense created", body = MutationResponse<ExpenseResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/expense")]
pub async fn create_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    body: web::Json<ExpenseDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let expense = ExpenseService::create(pool.get_ref(), auth.user_id, &body).await?;

    Ok(HttpResponse::Created().json(MutationResponse::new(
        "Expense added successfully",
        ExpenseResponse::from(expense),
    )))
}

/// GET /expense - List expenses with optional month/year and category filters
#[utoipa::path(
    get,
    path = "/expense",
    tag = "Expense",
    params(ExpenseFilters),
    responses(
        (status = 200, description = "Expenses with whole-set total", body = ExpenseListResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/expense")]
pub async fn list_expenses(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<ExpenseFilters>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let window = ExpenseService::filter_window(&query)?;
    let (expenses, total) = ExpenseService::list(pool.get_ref(), auth.user_id, &query, window).await?;

    let data: Vec<ExpenseResponse> = expenses.into_iter().map(Into::into).collect();
    let count = data.len();

    Ok(HttpResponse::Ok().json(ExpenseListResponse {
        success: true,
        data,
        total,
        count,
    }))
}

/// GET /expense/{id} - Get one expense record
#[utoipa::path(
    get,
    path = "/expense/{id}",
    tag = "Expense",
    params(ExpenseIdPath),
    responses(
        (status = 200, description = "Expense record", body = DataResponse<ExpenseResponse>),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/expense/{id}")]
pub async fn get_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<ExpenseIdPath>,
) -> Result<HttpResponse, AppError> {
    let expense = ExpenseService::get(pool.get_ref(), auth.user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(ExpenseResponse::from(expense))))
}

/// PUT /expense/{id} - Replace an expense record
#[utoipa::path(
    put,
    path = "/expense/{id}",
    tag = "Expense",
    params(ExpenseIdPath),
    request_body = ExpenseDto,
    responses(
        (status = 200, description = "Expense updated", body = MutationResponse<ExpenseResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/expense/{id}")]
pub async fn update_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<ExpenseIdPath>,
    body: web::Json<ExpenseDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let expense = ExpenseService::update(pool.get_ref(), auth.user_id, path.id, &body).await?;

    Ok(HttpResponse::Ok().json(MutationResponse::new(
        "Expense updated successfully",
        ExpenseResponse::from(expense),
    )))
}

/// DELETE /expense/{id} - Delete an expense record
#[utoipa::path(
    delete,
    path = "/expense/{id}",
    tag = "Expense",
    params(ExpenseIdPath),
    responses(
        (status = 200, description = "Expense deleted", body = MessageResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/expense/{id}")]
pub async fn delete_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<ExpenseIdPath>,
) -> Result<HttpResponse, AppError> {
    ExpenseService::delete(pool.get_ref(), auth.user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Expense deleted successfully")))
}
