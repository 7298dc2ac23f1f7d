//! Itinerary-related DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use wayfarer_core::rules::not_blank;
use wayfarer_core::{
    Activity, Itinerary, ItineraryFilter, ItineraryId, ItineraryPatch, ItinerarySort,
    PageRequest, ShareHandle, UserId, ValidateExt, WayfarerError, WayfarerResult,
};

/// Request to create an itinerary.
///
/// Required fields are optional here so that a missing field is reported
/// as a validation error with a readable message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItineraryRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Destination is required"),
        custom(function = "not_blank", message = "Destination is required")
    )]
    pub destination: Option<String>,

    #[validate(required(message = "Start date is required"))]
    pub start_date: Option<NaiveDate>,

    #[validate(required(message = "End date is required"))]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl CreateItineraryRequest {
    /// Validates the request and builds a new itinerary owned by `owner`.
    pub fn into_itinerary(self, owner: UserId) -> WayfarerResult<Itinerary> {
        self.validate_request()?;
        validate_activities(&self.activities)?;

        let missing = |field: &str| WayfarerError::validation(format!("{field} is required"));
        let title = self.title.ok_or_else(|| missing("Title"))?;
        let destination = self.destination.ok_or_else(|| missing("Destination"))?;
        let start_date = self.start_date.ok_or_else(|| missing("Start date"))?;
        let end_date = self.end_date.ok_or_else(|| missing("End date"))?;

        if end_date < start_date {
            return Err(WayfarerError::validation(
                "End date must not be before start date",
            ));
        }

        Ok(Itinerary::new(
            owner,
            title,
            destination,
            start_date,
            end_date,
            self.activities,
        ))
    }
}

/// Request to update an itinerary.
///
/// Only these fields are ever read from the payload; any other key
/// (owner, id, share handle, timestamps) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItineraryRequest {
    #[validate(custom(function = "not_blank", message = "Title must not be blank"))]
    pub title: Option<String>,

    #[validate(custom(function = "not_blank", message = "Destination must not be blank"))]
    pub destination: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub activities: Option<Vec<Activity>>,
}

impl UpdateItineraryRequest {
    /// Validates the request and converts it to a patch.
    pub fn into_patch(self) -> WayfarerResult<ItineraryPatch> {
        self.validate_request()?;
        if let Some(activities) = &self.activities {
            validate_activities(activities)?;
        }

        Ok(ItineraryPatch {
            title: self.title,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            activities: self.activities,
        })
    }
}

fn validate_activities(activities: &[Activity]) -> WayfarerResult<()> {
    activities.iter().try_for_each(|activity| activity.validate_request())
}

/// Query parameters for listing the caller's itineraries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListItinerariesQuery {
    /// Exact destination match.
    pub destination: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Page size (default 10, max 100).
    pub limit: Option<u32>,
    /// Sort field, ascending (default `createdAt`).
    pub sort: Option<String>,
}

impl ListItinerariesQuery {
    /// Resolves defaults and checks the sort field against the allow-list.
    pub fn into_parts(self) -> WayfarerResult<(ItineraryFilter, ItinerarySort, PageRequest)> {
        let sort = match self.sort.as_deref() {
            Some(field) => field.parse()?,
            None => ItinerarySort::default(),
        };
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
        );
        let filter = ItineraryFilter {
            destination: self.destination,
        };
        Ok((filter, sort, page))
    }
}

/// Itinerary as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub id: ItineraryId,
    pub user_id: UserId,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub activities: Vec<Activity>,
    pub shareable_id: ShareHandle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Itinerary> for ItineraryResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            id: itinerary.id,
            user_id: itinerary.user_id,
            title: itinerary.title,
            destination: itinerary.destination,
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
            activities: itinerary.activities,
            shareable_id: itinerary.shareable_id,
            created_at: itinerary.created_at,
            updated_at: itinerary.updated_at,
        }
    }
}

/// Public view of an itinerary, reachable through its share handle.
///
/// Carries no owner id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharedItineraryResponse {
    pub id: ItineraryId,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub activities: Vec<Activity>,
    pub shareable_id: ShareHandle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Itinerary> for SharedItineraryResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            id: itinerary.id,
            title: itinerary.title,
            destination: itinerary.destination,
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
            activities: itinerary.activities,
            shareable_id: itinerary.shareable_id,
            created_at: itinerary.created_at,
            updated_at: itinerary.updated_at,
        }
    }
}

/// One page of the caller's itineraries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItineraryListResponse {
    /// Matching itineraries before pagination.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub itineraries: Vec<ItineraryResponse>,
}
