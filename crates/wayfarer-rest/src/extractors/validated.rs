//! JSON body extractor that also runs `validator` rules.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};
use wayfarer_core::{field_errors, ErrorResponse, WayfarerError};

/// `Json<T>` whose value has passed `T::validate`.
///
/// Unparseable bodies answer 400 `INVALID_JSON`; failed rules answer 400
/// `VALIDATION_ERROR` with one `details` entry per rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn bad_request(body: ErrorResponse) -> Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn reject_json(rejection: JsonRejection) -> Response {
    bad_request(ErrorResponse {
        code: "INVALID_JSON".to_string(),
        message: rejection.body_text(),
        details: None,
    })
}

fn reject_rules(errors: ValidationErrors) -> Response {
    let details = field_errors(&errors);
    let error = WayfarerError::from(errors);
    bad_request(ErrorResponse::from_error(&error).with_details(details))
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_json)?;
        value.validate().map_err(reject_rules)?;
        Ok(Self(value))
    }
}
