//! Path parameter parsing.

use wayfarer_core::{ItineraryId, ShareHandle, WayfarerError, WayfarerResult};

/// Parses an itinerary id from a path segment.
///
/// A malformed id is a client error.
pub fn parse_itinerary_id(raw: &str) -> WayfarerResult<ItineraryId> {
    ItineraryId::parse(raw)
        .map_err(|_| WayfarerError::validation(format!("Invalid itinerary id: {raw}")))
}

/// Parses a share handle from a path segment.
///
/// A malformed handle cannot match any itinerary, so it reads as absent.
pub fn parse_share_handle(raw: &str) -> WayfarerResult<ShareHandle> {
    ShareHandle::parse(raw).map_err(|_| WayfarerError::not_found("Itinerary", raw))
}
