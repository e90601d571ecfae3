use secrecy::Secret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

use super::jwt::create_token;
use super::models::{AuthResponse, LoginDto, RegisterDto, User};
use super::password::{hash_password, verify_password};

/// Authentication service handling user registration and login logic
pub struct AuthService;

impl AuthService {
    /// Register a new user and return a signed token
    pub async fn register(
        pool: &PgPool,
        jwt_secret: &Secret<String>,
        dto: &RegisterDto,
    ) -> Result<AuthResponse, AppError> {
        // Username and email are both globally unique
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE email = $1 OR username = $2",
        )
        .bind(&dto.email)
        .bind(&dto.username)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        if existing > 0 {
            return Err(AppError::Conflict(
                "User already exists with this email or username".to_string(),
            ));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;

        let token = create_token(user.id, jwt_secret)?;

        Ok(AuthResponse::new(
            "User registered successfully",
            token,
            &user,
        ))
    }

    /// Authenticate a user by email and password.
    /// Unknown email and wrong password yield the same generic message.
    pub async fn login(
        pool: &PgPool,
        jwt_secret: &Secret<String>,
        dto: &LoginDto,
    ) -> Result<AuthResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let is_valid = verify_password(&dto.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = create_token(user.id, jwt_secret)?;

        Ok(AuthResponse::new("Login successful", token, &user))
    }

    /// Get user by ID, failing with Unauthorized if the user no longer exists
    pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
    }
}
