use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for user registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterDto {
    /// Desired username (min 3 characters, globally unique)
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    #[schema(example = "janedoe")]
    pub username: String,
    /// User's email address (globally unique)
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Password (min 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[schema(example = "hunter22")]
    pub password: String,
}

/// Request body for user login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginDto {
    /// User's email address
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// User's password
    #[schema(example = "hunter22")]
    pub password: String,
}

/// User information returned in responses (never includes the hash)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user identifier
    pub id: Uuid,
    #[schema(example = "janedoe")]
    pub username: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserSummary {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response for successful register/login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Login successful")]
    pub message: String,
    /// Signed bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserSummary,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, token: String, user: &User) -> Self {
        Self {
            success: true,
            message: message.into(),
            token,
            user: UserSummary::from_user(user),
        }
    }
}

/// Response for GET /auth/verify
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    #[schema(example = true)]
    pub success: bool,
    pub user: UserSummary,
}

/// JWT claims carried by the access token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid, // User ID
    pub iat: usize, // Issued at
    pub exp: usize, // Expiration
}
