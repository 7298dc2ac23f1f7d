//! Error taxonomy shared by every layer.
//!
//! Client-facing kinds carry text that is safe to return verbatim.
//! Infrastructure kinds carry the underlying cause, which the HTTP edge
//! logs and replaces with [`INTERNAL_ERROR_MESSAGE`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body text of every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum WayfarerError {
    #[error("{resource_type} {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Missing, empty, or malformed input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Duplicate unique value, e.g. a second signup with the same email.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing, malformed, wrongly signed, or expired bearer token. The
    /// message never says which.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated, but the resource belongs to someone else.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("database: {0}")]
    Database(String),

    #[error("cache: {0}")]
    Cache(String),

    #[error("configuration: {0}")]
    Configuration(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl WayfarerError {
    /// HTTP status for this kind. A duplicate signup is 400, not 409.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Conflict(_) => 400,
            Self::Unauthenticated(_) | Self::InvalidCredentials => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Database(_) | Self::Cache(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for the `code` field of error bodies.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Text that may be shown to the caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { resource_type, .. } => format!("{resource_type} not found"),
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Unauthenticated(msg)
            | Self::Forbidden(msg) => msg.clone(),
            Self::InvalidCredentials => "Invalid password".to_string(),
            Self::Database(_) | Self::Cache(_) | Self::Configuration(_) | Self::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for WayfarerError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // ER_DUP_ENTRY
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation() || db_err.code().as_deref() == Some("1062") =>
            {
                Self::Conflict(db_err.message().to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for WayfarerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("json: {err}"))
    }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Per-field problems, present only for request validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// Rule that failed, e.g. `required` or `not_blank`.
    pub code: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn from_error(error: &WayfarerError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.public_message(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&WayfarerError> for ErrorResponse {
    fn from(error: &WayfarerError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (WayfarerError::not_found("Itinerary", 1), 404, "NOT_FOUND"),
            (WayfarerError::validation("x"), 400, "VALIDATION_ERROR"),
            (WayfarerError::conflict("x"), 400, "CONFLICT"),
            (WayfarerError::unauthenticated("x"), 401, "UNAUTHENTICATED"),
            (WayfarerError::InvalidCredentials, 401, "INVALID_CREDENTIALS"),
            (WayfarerError::forbidden("x"), 403, "FORBIDDEN"),
            (WayfarerError::Database("x".into()), 500, "DATABASE_ERROR"),
            (WayfarerError::Cache("x".into()), 500, "CACHE_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.error_code(), code, "{err}");
        }
    }

    #[test]
    fn test_server_causes_stay_private() {
        for err in [
            WayfarerError::Database("connection refused at 10.0.0.3:3306".into()),
            WayfarerError::Cache("READONLY You can't write against a read only replica".into()),
            WayfarerError::Internal("stack trace here".into()),
        ] {
            assert!(err.is_server_error());
            assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_client_messages_pass_through() {
        assert_eq!(
            WayfarerError::validation("Email field is empty").public_message(),
            "Email field is empty"
        );
        assert_eq!(
            WayfarerError::not_found("Itinerary", "abc").public_message(),
            "Itinerary not found"
        );
        assert_eq!(WayfarerError::InvalidCredentials.public_message(), "Invalid password");
    }

    #[test]
    fn test_body_omits_empty_details() {
        let body = ErrorResponse::from(&WayfarerError::Internal("boom".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_body_with_details() {
        let body = ErrorResponse::from_error(&WayfarerError::validation("Title is required"))
            .with_details(vec![FieldError {
                field: "title".to_string(),
                message: "Title is required".to_string(),
                code: "required".to_string(),
            }]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"][0]["field"], "title");
    }
}
