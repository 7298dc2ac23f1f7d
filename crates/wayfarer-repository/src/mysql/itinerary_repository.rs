//! MySQL itinerary repository implementation.

use crate::{traits::ItineraryRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use wayfarer_core::{
    Activity, Itinerary, ItineraryFilter, ItineraryId, ItinerarySort, Page, PageRequest,
    ShareHandle, UserId, WayfarerError, WayfarerResult,
};

const SELECT_COLUMNS: &str = "SELECT id, user_id, title, destination, start_date, end_date, \
     activities, shareable_id, created_at, updated_at FROM itineraries";

/// MySQL itinerary repository implementation.
#[derive(Clone)]
pub struct MySqlItineraryRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlItineraryRepository {
    /// Creates a new MySQL itinerary repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an itinerary.
#[derive(Debug, FromRow)]
struct ItineraryRow {
    id: String,
    user_id: String,
    title: String,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    activities: Json<Vec<Activity>>,
    shareable_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_uuid(value: &str) -> WayfarerResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| WayfarerError::Internal(format!("Invalid UUID in database: {e}")))
}

impl TryFrom<ItineraryRow> for Itinerary {
    type Error = WayfarerError;

    fn try_from(row: ItineraryRow) -> Result<Self, Self::Error> {
        Ok(Itinerary {
            id: ItineraryId(parse_uuid(&row.id)?),
            user_id: UserId::from_uuid(parse_uuid(&row.user_id)?),
            title: row.title,
            destination: row.destination,
            start_date: row.start_date,
            end_date: row.end_date,
            activities: row.activities.0,
            shareable_id: ShareHandle(parse_uuid(&row.shareable_id)?),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Maps a sort field to its column. Only these literals ever reach SQL.
const fn sort_column(sort: ItinerarySort) -> &'static str {
    match sort {
        ItinerarySort::CreatedAt => "created_at",
        ItinerarySort::UpdatedAt => "updated_at",
        ItinerarySort::StartDate => "start_date",
        ItinerarySort::EndDate => "end_date",
        ItinerarySort::Title => "title",
        ItinerarySort::Destination => "destination",
    }
}

#[async_trait]
impl ItineraryRepository for MySqlItineraryRepository {
    async fn save(&self, itinerary: &Itinerary) -> WayfarerResult<Itinerary> {
        debug!("Saving new itinerary: {}", itinerary.id);

        sqlx::query(
            r"
            INSERT INTO itineraries (id, user_id, title, destination, start_date, end_date,
                                     activities, shareable_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(itinerary.id.to_string())
        .bind(itinerary.user_id.to_string())
        .bind(&itinerary.title)
        .bind(&itinerary.destination)
        .bind(itinerary.start_date)
        .bind(itinerary.end_date)
        .bind(Json(&itinerary.activities))
        .bind(itinerary.shareable_id.to_string())
        .bind(itinerary.created_at)
        .bind(itinerary.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(itinerary.id)
            .await?
            .ok_or_else(|| WayfarerError::Internal("Failed to fetch inserted itinerary".to_string()))
    }

    async fn find_by_id(&self, id: ItineraryId) -> WayfarerResult<Option<Itinerary>> {
        debug!("Finding itinerary by id: {}", id);

        let row = sqlx::query_as::<_, ItineraryRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Itinerary::try_from).transpose()
    }

    async fn find_by_shareable_id(&self, handle: ShareHandle) -> WayfarerResult<Option<Itinerary>> {
        debug!("Finding itinerary by share handle");

        let row =
            sqlx::query_as::<_, ItineraryRow>(&format!("{SELECT_COLUMNS} WHERE shareable_id = ?"))
                .bind(handle.to_string())
                .fetch_optional(self.pool.inner())
                .await?;

        row.map(Itinerary::try_from).transpose()
    }

    async fn find_by_owner(
        &self,
        owner: UserId,
        filter: &ItineraryFilter,
        sort: ItinerarySort,
        page: PageRequest,
    ) -> WayfarerResult<Page<Itinerary>> {
        debug!(
            "Listing itineraries for {}, page: {}, limit: {}, sort: {}",
            owner, page.page, page.limit, sort
        );

        let owner_id = owner.to_string();
        let destination = filter.destination.as_deref();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM itineraries WHERE user_id = ? AND (? IS NULL OR destination = ?)",
        )
        .bind(&owner_id)
        .bind(destination)
        .bind(destination)
        .fetch_one(self.pool.inner())
        .await?;

        let sql = format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND (? IS NULL OR destination = ?) \
             ORDER BY {} ASC, id ASC LIMIT ? OFFSET ?",
            sort_column(sort)
        );
        let rows = sqlx::query_as::<_, ItineraryRow>(&sql)
            .bind(&owner_id)
            .bind(destination)
            .bind(destination)
            .bind(i64::from(page.limit))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows
            .into_iter()
            .map(Itinerary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, u64::try_from(total).unwrap_or(0)))
    }

    async fn update(&self, itinerary: &Itinerary) -> WayfarerResult<Itinerary> {
        debug!("Updating itinerary: {}", itinerary.id);

        // user_id and shareable_id are deliberately absent from SET.
        sqlx::query(
            r"
            UPDATE itineraries
            SET title = ?, destination = ?, start_date = ?, end_date = ?,
                activities = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&itinerary.title)
        .bind(&itinerary.destination)
        .bind(itinerary.start_date)
        .bind(itinerary.end_date)
        .bind(Json(&itinerary.activities))
        .bind(itinerary.updated_at)
        .bind(itinerary.id.to_string())
        .execute(self.pool.inner())
        .await?;

        // rows_affected is 0 for unchanged rows on MySQL, so re-read instead.
        self.find_by_id(itinerary.id)
            .await?
            .ok_or_else(|| WayfarerError::not_found("Itinerary", itinerary.id))
    }

    async fn delete(&self, id: ItineraryId) -> WayfarerResult<bool> {
        debug!("Deleting itinerary: {}", id);

        let result = sqlx::query("DELETE FROM itineraries WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sort_maps_to_a_column() {
        for sort in ItinerarySort::ALL {
            let column = sort_column(sort);
            assert!(column.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
        assert_eq!(sort_column(ItinerarySort::default()), "created_at");
    }
}
