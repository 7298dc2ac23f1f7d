//! Repository trait definitions.

use async_trait::async_trait;
use wayfarer_core::{
    Email, Itinerary, ItineraryFilter, ItineraryId, ItinerarySort, Page, PageRequest, ShareHandle,
    User, UserId, WayfarerResult,
};

/// Identity store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> WayfarerResult<Option<User>>;

    /// Finds a user by (normalized) email.
    async fn find_by_email(&self, email: &Email) -> WayfarerResult<Option<User>>;

    /// Checks if an email is already registered.
    async fn exists_by_email(&self, email: &Email) -> WayfarerResult<bool>;

    /// Saves a new user. A duplicate email fails with `Conflict`.
    async fn save(&self, user: &User) -> WayfarerResult<User>;
}

/// Itinerary store.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// Saves a new itinerary. A duplicate share handle fails with `Conflict`.
    async fn save(&self, itinerary: &Itinerary) -> WayfarerResult<Itinerary>;

    /// Finds an itinerary by primary id.
    async fn find_by_id(&self, id: ItineraryId) -> WayfarerResult<Option<Itinerary>>;

    /// Finds an itinerary by its public share handle.
    async fn find_by_shareable_id(&self, handle: ShareHandle) -> WayfarerResult<Option<Itinerary>>;

    /// Lists the owner's itineraries matching `filter`, sorted ascending by
    /// `sort` with the id as tie-breaker. `Page::total` counts all matches.
    async fn find_by_owner(
        &self,
        owner: UserId,
        filter: &ItineraryFilter,
        sort: ItinerarySort,
        page: PageRequest,
    ) -> WayfarerResult<Page<Itinerary>>;

    /// Persists the mutable fields of an existing itinerary.
    ///
    /// Owner, share handle and creation time are never written. Returns
    /// `NotFound` if the row no longer exists.
    async fn update(&self, itinerary: &Itinerary) -> WayfarerResult<Itinerary>;

    /// Hard-deletes an itinerary. Returns false if nothing was deleted.
    async fn delete(&self, id: ItineraryId) -> WayfarerResult<bool>;
}
