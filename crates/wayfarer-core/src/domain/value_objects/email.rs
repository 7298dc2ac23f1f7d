//! Login identifier.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use validator::ValidateEmail;

/// The supplied text is not an email address.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("not an email address: {0:?}")]
pub struct EmailError(String);

/// Email address used as the unique account key.
///
/// Stored trimmed and lower-cased, so `Ann@Example.com` and
/// `ann@example.com ` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Email {
    /// Normalizes `raw` and checks that it is a syntactically valid address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailError> {
        let normalized = normalize(raw.as_ref());
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(EmailError(normalized))
        }
    }

    /// Wraps a value that was validated before it was persisted.
    #[must_use]
    pub fn new_unchecked(raw: impl AsRef<str>) -> Self {
        Self(normalize(raw.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
