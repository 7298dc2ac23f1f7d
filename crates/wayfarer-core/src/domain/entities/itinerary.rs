//! Itinerary entity and its query/patch companions.

use crate::validation::rules::not_blank;
use crate::{ItineraryId, Owned, ShareHandle, UserId, WayfarerError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// A single planned activity within an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Activity {
    /// Free-form time of day, e.g. `09:00`.
    #[validate(custom(function = "not_blank", message = "Activity time is required"))]
    pub time: String,
    #[validate(custom(function = "not_blank", message = "Activity description is required"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Activity location is required"))]
    pub location: String,
}

/// A user-owned travel itinerary.
///
/// This is also the snapshot shape stored in the look-aside cache, so it
/// carries the owner id; public views are built from it by dropping
/// `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: ItineraryId,
    /// Owner, fixed at creation.
    pub user_id: UserId,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub activities: Vec<Activity>,
    /// Public share handle, fixed at creation.
    pub shareable_id: ShareHandle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Itinerary {
    /// Creates a new itinerary for `owner` with a freshly generated share handle.
    #[must_use]
    pub fn new(
        owner: UserId,
        title: String,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        activities: Vec<Activity>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ItineraryId::new(),
            user_id: owner,
            title,
            destination,
            start_date,
            end_date,
            activities,
            shareable_id: ShareHandle::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the allow-listed fields of `patch` onto this itinerary.
    ///
    /// Owner, id, share handle and creation time are never touched.
    /// Fails without modifying `self` if the merged dates would be
    /// out of order.
    pub fn apply(&mut self, patch: ItineraryPatch) -> Result<(), WayfarerError> {
        let start = patch.start_date.unwrap_or(self.start_date);
        let end = patch.end_date.unwrap_or(self.end_date);
        if end < start {
            return Err(WayfarerError::validation(
                "End date must not be before start date",
            ));
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(destination) = patch.destination {
            self.destination = destination;
        }
        if let Some(activities) = patch.activities {
            self.activities = activities;
        }
        self.start_date = start;
        self.end_date = end;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Owned for Itinerary {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// The mergeable subset of an itinerary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryPatch {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub activities: Option<Vec<Activity>>,
}

/// Filter for listing a user's itineraries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryFilter {
    /// Exact destination match.
    pub destination: Option<String>,
}

/// Fields a listing may be sorted by (always ascending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItinerarySort {
    #[default]
    CreatedAt,
    UpdatedAt,
    StartDate,
    EndDate,
    Title,
    Destination,
}

impl ItinerarySort {
    /// All accepted sort fields.
    pub const ALL: [Self; 6] = [
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::StartDate,
        Self::EndDate,
        Self::Title,
        Self::Destination,
    ];

    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Title => "title",
            Self::Destination => "destination",
        }
    }
}

impl fmt::Display for ItinerarySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItinerarySort {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| {
                let allowed = Self::ALL.map(Self::as_str).join(", ");
                WayfarerError::validation(format!(
                    "Unsupported sort field '{s}' (allowed: {allowed})"
                ))
            })
    }
}
