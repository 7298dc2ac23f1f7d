//! Entity-DTO mappers.

use crate::dto::{ItineraryListResponse, ItineraryResponse};
use wayfarer_core::{Itinerary, Page};

impl From<Page<Itinerary>> for ItineraryListResponse {
    fn from(page: Page<Itinerary>) -> Self {
        Self {
            total: page.total,
            page: page.page,
            limit: page.limit,
            itineraries: page.items.into_iter().map(ItineraryResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wayfarer_core::{PageRequest, UserId};

    #[test]
    fn test_page_maps_to_list_response() {
        let day = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let items = vec![Itinerary::new(
            UserId::new(),
            "Trip".to_string(),
            "Paris".to_string(),
            day,
            day,
            Vec::new(),
        )];
        let page = Page::new(items, PageRequest::new(2, 1), 7);

        let response = ItineraryListResponse::from(page);
        assert_eq!(response.total, 7);
        assert_eq!(response.page, 2);
        assert_eq!(response.limit, 1);
        assert_eq!(response.itineraries.len(), 1);
    }
}
