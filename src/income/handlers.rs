use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;
use crate::responses::{DataResponse, MessageResponse, MutationResponse};

use super::models::{IncomeDto, IncomeFilters, IncomeIdPath, IncomeListResponse, IncomeResponse};
use super::service::IncomeService;

/// POST /income - Record an income
#[utoipa::path(
    post,
    path = "/income",
    tag = "Income",
    request_body = IncomeDto,
    responses(
        (status = 201, description = "Income created", body = MutationResponse<IncomeResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/income")]
pub async fn create_income(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    body: web::Json<IncomeDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let income = IncomeService::create(pool.get_ref(), auth.user_id, &body).await?;

    Ok(HttpResponse::Created().json(MutationResponse::new(
        "Income added successfully",
        IncomeResponse::from(income),
    )))
}

/// GET /income - List incomes with optional month/year filter
#[utoipa::path(
    get,
    path = "/income",
    tag = "Income",
    params(IncomeFilters),
    responses(
        (status = 200, description = "Incomes with whole-set total", body = IncomeListResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/income")]
pub async fn list_incomes(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<IncomeFilters>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let window = IncomeService::filter_window(&query)?;
    let (incomes, total) =
        IncomeService::list(pool.get_ref(), auth.user_id, window, query.limit).await?;

    let data: Vec<IncomeResponse> = incomes.into_iter().map(Into::into).collect();
    let count = data.len();

    Ok(HttpResponse::Ok().json(IncomeListResponse {
        success: true,
        data,
        total,
        count,
    }))
}

/// GET /income/{id} - Get one income record
#[utoipa::path(
    get,
    path = "/income/{id}",
    tag = "Income",
    params(IncomeIdPath),
    responses(
        (status = 200, description = "Income record", body = DataResponse<IncomeResponse>),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/income/{id}")]
pub async fn get_income(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<IncomeIdPath>,
) -> Result<HttpResponse, AppError> {
    let income = IncomeService::get(pool.get_ref(), auth.user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(IncomeResponse::from(income))))
}

/// PUT /income/{id} - Replace an income record
#[utoipa::path(
    put,
    path = "/income/{id}",
    tag = "Income",
    params(IncomeIdPath),
    request_body = IncomeDto,
    responses(
        (status = 200, description = "Income updated", body = MutationResponse<IncomeResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/income/{id}")]
pub async fn update_income(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<IncomeIdPath>,
    body: web::Json<IncomeDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let income = IncomeService::update(pool.get_ref(), auth.user_id, path.id, &body).await?;

    Ok(HttpResponse::Ok().json(MutationResponse::new(
        "Income updated successfully",
        IncomeResponse::from(income),
    )))
}

/// DELETE /income/{id} - Delete an income record
#[utoipa::path(
    delete,
    path = "/income/{id}",
    tag = "Income",
    params(IncomeIdPath),
    responses(
        (status = 200, description = "Income deleted", body = MessageResponse),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/income/{id}")]
pub async fn delete_income(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<IncomeIdPath>,
) -> Result<HttpResponse, AppError> {
    IncomeService::delete(pool.get_ref(), auth.user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Income deleted successfully")))
}
