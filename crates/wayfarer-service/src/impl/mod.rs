//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `itinerary_service.rs`).

pub mod itinerary_service_impl;

pub use itinerary_service_impl::{ItineraryServiceImpl, DELETED_MESSAGE};
