//! In-process repository implementations.

mod itinerary_repository;
mod user_repository;

pub use itinerary_repository::InMemoryItineraryRepository;
pub use user_repository::InMemoryUserRepository;
