//! Itinerary service trait definition.

use crate::dto::{
    CreateItineraryRequest, ItineraryListResponse, ItineraryResponse, ListItinerariesQuery,
    MessageResponse, SharedItineraryResponse, UpdateItineraryRequest,
};
use async_trait::async_trait;
use wayfarer_core::{ItineraryId, ShareHandle, WayfarerResult};
use wayfarer_security::Claims;

/// Itinerary service trait.
///
/// Every operation except [`ItineraryService::get_shared`] acts on behalf
/// of the authenticated caller described by `claims`.
#[async_trait]
pub trait ItineraryService: Send + Sync {
    /// Creates an itinerary owned by the caller.
    async fn create(
        &self,
        claims: &Claims,
        request: CreateItineraryRequest,
    ) -> WayfarerResult<ItineraryResponse>;

    /// Lists the caller's own itineraries.
    async fn list(
        &self,
        claims: &Claims,
        query: ListItinerariesQuery,
    ) -> WayfarerResult<ItineraryListResponse>;

    /// Gets one of the caller's itineraries, reading through the cache.
    async fn get(&self, claims: &Claims, id: ItineraryId) -> WayfarerResult<ItineraryResponse>;

    /// Merges allow-listed fields onto one of the caller's itineraries.
    async fn update(
        &self,
        claims: &Claims,
        id: ItineraryId,
        request: UpdateItineraryRequest,
    ) -> WayfarerResult<ItineraryResponse>;

    /// Hard-deletes one of the caller's itineraries.
    async fn delete(&self, claims: &Claims, id: ItineraryId) -> WayfarerResult<MessageResponse>;

    /// Public read by share handle. Never consults the cache.
    async fn get_shared(&self, handle: ShareHandle) -> WayfarerResult<SharedItineraryResponse>;
}
