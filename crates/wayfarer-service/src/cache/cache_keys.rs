//! Key layout in the shared cache. Everything lives under `wayfarer:`.

use wayfarer_core::ItineraryId;

const NAMESPACE: &str = "wayfarer";

/// Snapshot of one itinerary, as returned by `get`.
#[must_use]
pub fn itinerary_by_id(id: ItineraryId) -> String {
    format!("{NAMESPACE}:itinerary:{id}")
}
