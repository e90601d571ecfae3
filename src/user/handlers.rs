use actix_web::{delete, get, put, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::models::UserSummary;
use crate::auth::service::AuthService;
use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;
use crate::responses::{DataResponse, MessageResponse, MutationResponse};

use super::models::{ChangePasswordDto, DeleteAccountDto, UpdateProfileDto};
use super::service::UserService;

/// GET /user/profile - The caller's profile
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "User",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = DataResponse<UserSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/user/profile")]
pub async fn get_profile(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = AuthService::get_user_by_id(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(UserSummary::from_user(&user))))
}

/// PUT /user/profile - Update username and email
#[utoipa::path(
    put,
    path = "/user/profile",
    tag = "User",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = MutationResponse<UserSummary>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/user/profile")]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    body: web::Json<UpdateProfileDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::update_profile(pool.get_ref(), auth.user_id, &body).await?;

    Ok(HttpResponse::Ok().json(MutationResponse::new(
        "Profile updated successfully",
        UserSummary::from_user(&user),
    )))
}

/// PUT /user/change-password - Replace the password
#[utoipa::path(
    put,
    path = "/user/change-password",
    tag = "User",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Current password incorrect", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/user/change-password")]
pub async fn change_password(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    body: web::Json<ChangePasswordDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    UserService::change_password(pool.get_ref(), auth.user_id, &body).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password changed successfully")))
}

/// DELETE /user/account - Delete the account and all its records
#[utoipa::path(
    delete,
    path = "/user/account",
    tag = "User",
    request_body = DeleteAccountDto,
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Password incorrect", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/user/account")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    body: web::Json<DeleteAccountDto>,
) -> Result<HttpResponse, AppError> {
    UserService::delete_account(pool.get_ref(), auth.user_id, &body).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Account deleted successfully")))
}
