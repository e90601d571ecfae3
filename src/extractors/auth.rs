use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use secrecy::Secret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::decode_token;
use crate::errors::AppError;

/// Extractor that validates the bearer token and resolves the caller.
///
/// Rejects the request before any handler logic runs when the token is
/// missing, malformed, expired, or references a user that no longer
/// exists.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let jwt_secret = req
                .app_data::<web::Data<Secret<String>>>()
                .ok_or_else(|| AppError::InternalError("JWT secret not configured".to_string()))?
                .get_ref()
                .clone();

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| AppError::InternalError("Database pool not configured".to_string()))?
                .get_ref()
                .clone();

            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|t| t.to_string())
                .ok_or_else(|| {
                    AppError::Unauthorized("Missing or invalid Authorization header".to_string())
                })?;

            let claims = decode_token(&token, &jwt_secret)?;

            // Tokens can outlive their account
            let user_exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                    .bind(claims.sub)
                    .fetch_one(&pool)
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;

            if !user_exists {
                return Err(AppError::Unauthorized("User not found".to_string()));
            }

            Ok(AuthenticatedUser {
                user_id: claims.sub,
            })
        })
    }
}
