use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::models::User;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::service::AuthService;
use crate::errors::AppError;

use super::models::{ChangePasswordDto, DeleteAccountDto, UpdateProfileDto};

/// Service layer for profile and account management
pub struct UserService;

impl UserService {
    /// Update username and email, rejecting values already taken by
    /// another user
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        dto: &UpdateProfileDto,
    ) -> Result<User, AppError> {
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE (email = $1 OR username = $2) AND id != $3",
        )
        .bind(&dto.email)
        .bind(&dto.username)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        if taken > 0 {
            return Err(AppError::Conflict(
                "Email or username is already in use".to_string(),
            ));
        }

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, email = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Replace the password hash after verifying the current password
    pub async fn change_password(
        pool: &PgPool,
        user_id: Uuid,
        dto: &ChangePasswordDto,
    ) -> Result<(), AppError> {
        let user = AuthService::get_user_by_id(pool, user_id).await?;

        let is_valid = verify_password(&dto.current_password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(())
    }

    /// Delete the user and all their records in one transaction,
    /// after verifying the password
    pub async fn delete_account(
        pool: &PgPool,
        user_id: Uuid,
        dto: &DeleteAccountDto,
    ) -> Result<(), AppError> {
        let user = AuthService::get_user_by_id(pool, user_id).await?;

        let is_valid = verify_password(&dto.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized("Password is incorrect".to_string()));
        }

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        sqlx::query("DELETE FROM incomes WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        sqlx::query("DELETE FROM expenses WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(())
    }
}
