use actix_web::HttpRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::errors::AppError;

use super::models::TokenClaims;

/// Fixed validity window for issued tokens
pub const TOKEN_EXPIRY_DAYS: i64 = 7;

/// Create a signed bearer token encoding the user id
pub fn create_token(user_id: Uuid, jwt_secret: &Secret<String>) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + Duration::days(TOKEN_EXPIRY_DAYS);

    let claims = TokenClaims {
        sub: user_id,
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Failed to create token: {e}")))
}

/// Decode and validate a bearer token (signature + expiry)
pub fn decode_token(token: &str, jwt_secret: &Secret<String>) -> Result<TokenClaims, AppError> {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))
}

/// Extract Bearer token from Authorization header
pub fn extract_token(req: &HttpRequest) -> Result<String, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or_else(|| {
            AppError::Unauthorized("Missing or invalid Authorization header".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> Secret<String> {
        Secret::new(s.to_string())
    }

    #[test]
    fn test_create_token_is_jwt() {
        let token = create_token(Uuid::new_v4(), &secret("test_secret")).expect("Should create");
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3, "JWT should have 3 parts");
    }

    #[test]
    fn test_round_trip_preserves_user_id() {
        let user_id = Uuid::new_v4();
        let jwt_secret = secret("test_secret_key_for_testing");

        let token = create_token(user_id, &jwt_secret).expect("Should create token");
        let claims = decode_token(&token, &jwt_secret).expect("Should decode token");

        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_decode_token_wrong_secret() {
        let token = create_token(Uuid::new_v4(), &secret("correct_secret")).expect("Should create");
        let result = decode_token(&token, &secret("wrong_secret"));
        assert!(result.is_err(), "Wrong secret should fail verification");
    }

    #[test]
    fn test_decode_token_malformed() {
        let result = decode_token("not.a.token", &secret("test_secret"));
        assert!(result.is_err(), "Malformed token should fail");
    }

    #[test]
    fn test_token_expiry_window() {
        let jwt_secret = secret("test_secret_key");
        let token = create_token(Uuid::new_v4(), &jwt_secret).expect("Should create token");
        let claims = decode_token(&token, &jwt_secret).expect("Should decode token");

        let now = Utc::now().timestamp() as usize;
        let expected_exp = now + (TOKEN_EXPIRY_DAYS * 24 * 60 * 60) as usize;

        assert!(
            claims.exp >= expected_exp - 5 && claims.exp <= expected_exp + 5,
            "Expiration should be {TOKEN_EXPIRY_DAYS} days from now"
        );
        assert!(
            claims.iat >= now - 5 && claims.iat <= now + 5,
            "Issued at should be close to now"
        );
    }
}
