//! # Wayfarer Service
//!
//! Business logic for signup/login and owner-scoped itinerary management,
//! including the look-aside cache protocol around single-itinerary reads.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod itinerary_service;
pub mod mappers;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use itinerary_service::*;
pub use r#impl::*;
