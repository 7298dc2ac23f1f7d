//! Data Transfer Objects (DTOs).

mod auth_dto;
mod itinerary_dto;

pub use auth_dto::*;
pub use itinerary_dto::*;
