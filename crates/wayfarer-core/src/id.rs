//! UUID-backed identifiers.
//!
//! Each kind of id is its own type so an itinerary id can never be passed
//! where a share handle is expected. All of them travel as plain UUID
//! strings on the wire and in the database.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Accepts any hyphenated or simple UUID text.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }

            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_newtype!(
    /// Account id, assigned at signup.
    UserId
);

uuid_newtype!(
    /// Itinerary id. Time-ordered, so new rows append to the primary key index.
    ItineraryId
);

uuid_newtype!(
    /// Capability for the public read-only view of one itinerary.
    ///
    /// Random (v4) so a handle says nothing about when the itinerary was
    /// created or what its neighbours are.
    ShareHandle
);

impl UserId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ItineraryId {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareHandle {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}
