//! Result type aliases for Wayfarer.

use crate::WayfarerError;

/// A specialized `Result` type for Wayfarer operations.
pub type WayfarerResult<T> = Result<T, WayfarerError>;
