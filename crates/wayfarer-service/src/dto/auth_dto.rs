//! Authentication-related DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use wayfarer_core::rules::not_blank;

/// Signup request.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Email field is empty"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password field is empty"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Email field is empty"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password field is empty"))]
    pub password: String,
}

/// Token returned by signup and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

/// Simple message response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
