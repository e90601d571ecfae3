use actix_web::{get, post, web, HttpRequest, HttpResponse};
use secrecy::Secret;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};

use super::jwt::{decode_token, extract_token};
use super::models::{AuthResponse, LoginDto, RegisterDto, UserSummary, VerifyResponse};
use super::service::AuthService;

/// POST /auth/register - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse)
    )
)]
#[post("/auth/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    jwt_secret: web::Data<Secret<String>>,
    body: web::Json<RegisterDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = AuthService::register(pool.get_ref(), jwt_secret.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(response))
}

/// POST /auth/login - Authenticate and get a token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[post("/auth/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    jwt_secret: web::Data<Secret<String>>,
    body: web::Json<LoginDto>,
) -> Result<HttpResponse, AppError> {
    let response = AuthService::login(pool.get_ref(), jwt_secret.get_ref(), &body).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /auth/verify - Validate the bearer token and return the caller
#[utoipa::path(
    get,
    path = "/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/auth/verify")]
pub async fn verify(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    jwt_secret: web::Data<Secret<String>>,
) -> Result<HttpResponse, AppError> {
    let token = extract_token(&req)?;
    let claims = decode_token(&token, jwt_secret.get_ref())?;

    // The user may have deleted their account since the token was issued
    let user = AuthService::get_user_by_id(pool.get_ref(), claims.sub).await?;

    Ok(HttpResponse::Ok().json(VerifyResponse {
        success: true,
        user: UserSummary::from_user(&user),
    }))
}
