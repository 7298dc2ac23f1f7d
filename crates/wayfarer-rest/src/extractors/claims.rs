//! The caller behind a protected route.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use wayfarer_core::WayfarerError;
use wayfarer_security::{Claims, INVALID_TOKEN_MESSAGE};

/// Claims placed in the request by `auth_middleware`.
///
/// No header, a foreign scheme, a bad signature and an expired token all
/// end up here as "no claims" and get the same 401 body.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError(WayfarerError::unauthenticated(INVALID_TOKEN_MESSAGE)))
    }
}
