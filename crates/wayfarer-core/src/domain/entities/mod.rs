//! Domain entities.

mod itinerary;
mod user;

pub use itinerary::{Activity, Itinerary, ItineraryFilter, ItineraryPatch, ItinerarySort};
pub use user::User;
