//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod location;
mod table;

pub use location::{Location, LocationPatch};
pub use table::{MAX_SEATS, MIN_SEATS, SeatCount, Table, TablePatch, TableStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation and last-update instants of a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    /// Timestamps for an entity created now.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with the update instant moved to now.
    #[must_use]
    pub fn touched(self) -> Self {
        Self {
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// Treats blank optional patch values as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
