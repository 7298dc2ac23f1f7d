//! # Wayfarer Security
//!
//! Token issuing and verification, password hashing, and the
//! ownership gate applied to every owner-scoped itinerary operation.

pub mod jwt;
pub mod ownership;
pub mod password;

pub use jwt::*;
pub use ownership::*;
pub use password::*;
