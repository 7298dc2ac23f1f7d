//! Itinerary service implementation.
//!
//! Single-itinerary reads go through a look-aside cache keyed by id:
//!
//! - `get` reads the cache first and falls back to the store, then fills
//!   the key only if it is still vacant, so a snapshot written by a
//!   concurrent `update` is never replaced by the older row.
//! - `update` persists, invalidates the key, then sets the new snapshot.
//! - `delete` removes the row, then invalidates the key.
//! - `list` and `get_shared` only ever read the store.
//!
//! There is no transaction spanning the store and the cache. Concurrent
//! updates to the same itinerary are last-write-wins at the store, and the
//! cached snapshot reflects whichever invalidate/set pair finished last.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{
    CreateItineraryRequest, ItineraryListResponse, ItineraryResponse, ListItinerariesQuery,
    MessageResponse, SharedItineraryResponse, UpdateItineraryRequest,
};
use crate::itinerary_service::ItineraryService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wayfarer_core::{Itinerary, ItineraryId, ShareHandle, WayfarerError, WayfarerResult};
use wayfarer_repository::ItineraryRepository;
use wayfarer_security::{Claims, ClaimsExt};

/// Message returned after a successful delete.
pub const DELETED_MESSAGE: &str = "Itinerary deleted successfully";

const RESOURCE: &str = "Itinerary";

/// Itinerary service backed by a repository and a look-aside cache.
pub struct ItineraryServiceImpl {
    itinerary_repository: Arc<dyn ItineraryRepository>,
    cache: Arc<dyn CacheInterface>,
}

impl ItineraryServiceImpl {
    /// Creates a new itinerary service.
    pub fn new(
        itinerary_repository: Arc<dyn ItineraryRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            itinerary_repository,
            cache,
        }
    }

    /// Loads a fresh copy from the store and checks the caller owns it.
    ///
    /// Absence is reported before ownership.
    async fn load_owned(&self, claims: &Claims, id: ItineraryId) -> WayfarerResult<Itinerary> {
        let itinerary = self
            .itinerary_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| WayfarerError::not_found(RESOURCE, id))?;

        claims.require_owner_of(&itinerary)?;
        Ok(itinerary)
    }

    /// Read-through fill. Failure only costs a future cache miss.
    async fn populate(&self, key: &str, itinerary: &Itinerary) {
        match self.cache.set_if_absent(key, itinerary).await {
            Ok(true) => {}
            Ok(false) => debug!(key, "Newer itinerary snapshot already cached"),
            Err(e) => warn!(key, error = %e, "Failed to populate itinerary cache"),
        }
    }

    /// Writes the post-update snapshot over whatever is cached.
    async fn replace(&self, key: &str, itinerary: &Itinerary) {
        if let Err(e) = self.cache.set(key, itinerary).await {
            warn!(key, error = %e, "Failed to refresh itinerary cache");
        }
    }
}

#[async_trait]
impl ItineraryService for ItineraryServiceImpl {
    async fn create(
        &self,
        claims: &Claims,
        request: CreateItineraryRequest,
    ) -> WayfarerResult<ItineraryResponse> {
        let itinerary = request.into_itinerary(claims.user_id())?;
        debug!("Creating itinerary {} for user {}", itinerary.id, itinerary.user_id);

        let saved = self.itinerary_repository.save(&itinerary).await?;

        info!("Itinerary created: {}", saved.id);
        Ok(ItineraryResponse::from(saved))
    }

    async fn list(
        &self,
        claims: &Claims,
        query: ListItinerariesQuery,
    ) -> WayfarerResult<ItineraryListResponse> {
        let (filter, sort, page) = query.into_parts()?;
        debug!(
            "Listing itineraries for user {}, page: {}, limit: {}, sort: {}",
            claims.user_id(),
            page.page,
            page.limit,
            sort
        );

        let itineraries = self
            .itinerary_repository
            .find_by_owner(claims.user_id(), &filter, sort, page)
            .await?;
        Ok(ItineraryListResponse::from(itineraries))
    }

    async fn get(&self, claims: &Claims, id: ItineraryId) -> WayfarerResult<ItineraryResponse> {
        debug!("Getting itinerary: {}", id);

        let cache_key = cache_keys::itinerary_by_id(id);

        // Cached snapshots keep the owner id so a hit is authorized too.
        if let Some(cached) = self.cache.get::<Itinerary>(&cache_key).await? {
            claims.require_owner_of(&cached)?;
            return Ok(ItineraryResponse::from(cached));
        }

        let itinerary = self.load_owned(claims, id).await?;
        self.populate(&cache_key, &itinerary).await;

        Ok(ItineraryResponse::from(itinerary))
    }

    async fn update(
        &self,
        claims: &Claims,
        id: ItineraryId,
        request: UpdateItineraryRequest,
    ) -> WayfarerResult<ItineraryResponse> {
        debug!("Updating itinerary: {}", id);

        let mut itinerary = self.load_owned(claims, id).await?;
        itinerary.apply(request.into_patch()?)?;

        let updated = self.itinerary_repository.update(&itinerary).await?;

        // Invalidate before set so no reader sees a half-applied entry.
        let cache_key = cache_keys::itinerary_by_id(id);
        self.cache.delete(&cache_key).await?;
        self.replace(&cache_key, &updated).await;

        info!("Itinerary updated: {}", id);
        Ok(ItineraryResponse::from(updated))
    }

    async fn delete(&self, claims: &Claims, id: ItineraryId) -> WayfarerResult<MessageResponse> {
        debug!("Deleting itinerary: {}", id);

        self.load_owned(claims, id).await?;

        if !self.itinerary_repository.delete(id).await? {
            return Err(WayfarerError::not_found(RESOURCE, id));
        }

        self.cache.delete(&cache_keys::itinerary_by_id(id)).await?;

        info!("Itinerary deleted: {}", id);
        Ok(MessageResponse::new(DELETED_MESSAGE))
    }

    async fn get_shared(&self, handle: ShareHandle) -> WayfarerResult<SharedItineraryResponse> {
        debug!("Getting shared itinerary: {}", handle);

        let itinerary = self
            .itinerary_repository
            .find_by_shareable_id(handle)
            .await?
            .ok_or_else(|| WayfarerError::not_found(RESOURCE, handle))?;

        Ok(SharedItineraryResponse::from(itinerary))
    }
}

impl std::fmt::Debug for ItineraryServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryServiceImpl").finish_non_exhaustive()
    }
}
