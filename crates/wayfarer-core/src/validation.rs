//! Bridge from `validator` derives to [`WayfarerError`].

use crate::{FieldError, WayfarerError};
use validator::{Validate, ValidationErrors};

/// `validate()` that yields a [`WayfarerError::Validation`].
pub trait ValidateExt: Validate {
    fn validate_request(&self) -> Result<(), WayfarerError> {
        self.validate().map_err(WayfarerError::from)
    }
}

impl<T: Validate> ValidateExt for T {}

/// One entry per failed rule, ordered by field name so messages are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| FieldError {
                field: field.to_string(),
                message: failure
                    .message
                    .as_deref()
                    .map_or_else(|| failure.code.to_string(), str::to_string),
                code: failure.code.to_string(),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// The rule messages joined with `"; "`.
impl From<ValidationErrors> for WayfarerError {
    fn from(errors: ValidationErrors) -> Self {
        let message = field_errors(&errors)
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(message)
    }
}

/// Custom rules for `#[validate(custom(function = ...))]`.
pub mod rules {
    use validator::ValidationError;

    /// Rejects empty and whitespace-only strings.
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new("not_blank"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rules::not_blank;
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(custom(function = "not_blank", message = "Title is required"))]
        title: String,
        #[validate(custom(function = "not_blank", message = "Destination is required"))]
        destination: String,
    }

    fn probe(title: &str, destination: &str) -> Probe {
        Probe {
            title: title.to_string(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Lyon").is_ok());
        assert!(not_blank(" \t").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_messages_are_joined_in_field_order() {
        let err = probe(" ", "").validate_request().unwrap_err();
        assert!(matches!(
            err,
            WayfarerError::Validation(ref m) if m == "Destination is required; Title is required"
        ));
    }

    #[test]
    fn test_field_errors_carry_rule_code() {
        let errors = probe("", "Lyon").validate().unwrap_err();
        let fields = field_errors(&errors);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "title");
        assert_eq!(fields[0].code, "not_blank");
    }

    #[test]
    fn test_valid_probe() {
        assert!(probe("Trip", "Lyon").validate_request().is_ok());
    }
}
