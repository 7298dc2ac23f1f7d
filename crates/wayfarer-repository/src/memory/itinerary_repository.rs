//! In-memory itinerary repository.

use crate::traits::ItineraryRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use wayfarer_core::{
    Itinerary, ItineraryFilter, ItineraryId, ItinerarySort, Page, PageRequest, ShareHandle, UserId,
    WayfarerError, WayfarerResult,
};

/// In-memory itinerary repository with a unique share handle constraint.
#[derive(Debug, Default)]
pub struct InMemoryItineraryRepository {
    itineraries: RwLock<HashMap<ItineraryId, Itinerary>>,
}

impl InMemoryItineraryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored itineraries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.itineraries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.itineraries.read().is_empty()
    }
}

fn compare(sort: ItinerarySort, a: &Itinerary, b: &Itinerary) -> Ordering {
    let primary = match sort {
        ItinerarySort::CreatedAt => a.created_at.cmp(&b.created_at),
        ItinerarySort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        ItinerarySort::StartDate => a.start_date.cmp(&b.start_date),
        ItinerarySort::EndDate => a.end_date.cmp(&b.end_date),
        ItinerarySort::Title => a.title.cmp(&b.title),
        ItinerarySort::Destination => a.destination.cmp(&b.destination),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ItineraryRepository for InMemoryItineraryRepository {
    async fn save(&self, itinerary: &Itinerary) -> WayfarerResult<Itinerary> {
        let mut itineraries = self.itineraries.write();
        if itineraries
            .values()
            .any(|i| i.shareable_id == itinerary.shareable_id)
        {
            return Err(WayfarerError::conflict(
                "Duplicate entry for key 'uq_itineraries_shareable_id'",
            ));
        }
        itineraries.insert(itinerary.id, itinerary.clone());
        Ok(itinerary.clone())
    }

    async fn find_by_id(&self, id: ItineraryId) -> WayfarerResult<Option<Itinerary>> {
        Ok(self.itineraries.read().get(&id).cloned())
    }

    async fn find_by_shareable_id(&self, handle: ShareHandle) -> WayfarerResult<Option<Itinerary>> {
        Ok(self
            .itineraries
            .read()
            .values()
            .find(|i| i.shareable_id == handle)
            .cloned())
    }

    async fn find_by_owner(
        &self,
        owner: UserId,
        filter: &ItineraryFilter,
        sort: ItinerarySort,
        page: PageRequest,
    ) -> WayfarerResult<Page<Itinerary>> {
        let mut matching: Vec<Itinerary> = self
            .itineraries
            .read()
            .values()
            .filter(|i| i.user_id == owner)
            .filter(|i| {
                filter
                    .destination
                    .as_ref()
                    .map_or(true, |d| &i.destination == d)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| compare(sort, a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.limit as usize)
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn update(&self, itinerary: &Itinerary) -> WayfarerResult<Itinerary> {
        let mut itineraries = self.itineraries.write();
        let stored = itineraries
            .get_mut(&itinerary.id)
            .ok_or_else(|| WayfarerError::not_found("Itinerary", itinerary.id))?;

        stored.title.clone_from(&itinerary.title);
        stored.destination.clone_from(&itinerary.destination);
        stored.start_date = itinerary.start_date;
        stored.end_date = itinerary.end_date;
        stored.activities.clone_from(&itinerary.activities);
        stored.updated_at = itinerary.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: ItineraryId) -> WayfarerResult<bool> {
        Ok(self.itineraries.write().remove(&id).is_some())
    }
}
