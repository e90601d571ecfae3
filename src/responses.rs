use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope carrying a payload
#[derive(Debug, Serialize, ToSchema)]
pub struct DataResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success envelope for mutations that return the affected record
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Income added successfully")]
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MutationResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Success envelope for acknowledgements with no payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Account deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
