//! MySQL repository implementations.

mod itinerary_repository;
mod user_repository;

pub use itinerary_repository::*;
pub use user_repository::*;
