//! Ownership gate for owner-scoped resources.

use crate::Claims;
use tracing::warn;
use wayfarer_core::{Owned, UserId, WayfarerError, WayfarerResult};

/// Message returned when the caller does not own the resource.
pub const NOT_OWNER_MESSAGE: &str = "You do not have access to this itinerary";

/// Extension trait for Claims to check ownership.
pub trait ClaimsExt {
    /// Checks if the caller owns a resource with the given owner id.
    fn is_owner(&self, resource_owner_id: UserId) -> bool;

    /// Allows the call iff the caller owns `resource`, otherwise `Forbidden`.
    ///
    /// Callers must establish that the resource exists first, so that a
    /// missing resource reports `NotFound` rather than `Forbidden`.
    fn require_owner_of<R: Owned + ?Sized>(&self, resource: &R) -> WayfarerResult<()>;
}

impl ClaimsExt for Claims {
    fn is_owner(&self, resource_owner_id: UserId) -> bool {
        self.sub == resource_owner_id
    }

    fn require_owner_of<R: Owned + ?Sized>(&self, resource: &R) -> WayfarerResult<()> {
        if self.is_owner(resource.owner_id()) {
            Ok(())
        } else {
            warn!(caller = %self.sub, "Ownership check failed");
            Err(WayfarerError::forbidden(NOT_OWNER_MESSAGE))
        }
    }
}
