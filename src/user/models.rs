use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for updating the user profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    /// New username (min 3 characters, globally unique)
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    #[schema(example = "janedoe")]
    pub username: String,
    /// New email address (globally unique)
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Request body for changing the password
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    /// The user's current password
    #[schema(example = "hunter22")]
    pub current_password: String,
    /// New password (min 6 characters)
    #[validate(length(
        min = 6,
        message = "New password must be at least 6 characters long"
    ))]
    #[schema(example = "hunter23")]
    pub new_password: String,
}

/// Request body for deleting the account
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteAccountDto {
    /// The user's current password, required to confirm deletion
    #[schema(example = "hunter22")]
    pub password: String,
}
