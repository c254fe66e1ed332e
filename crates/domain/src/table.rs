use serde::{Deserialize, Serialize};
use venue_core::{AppError, AppResult, NonEmptyString};

use crate::{Timestamps, non_blank};

/// Smallest seat count a table may have.
pub const MIN_SEATS: u8 = 1;

/// Largest seat count a table may have.
pub const MAX_SEATS: u8 = 20;

/// Seat count bounded to `MIN_SEATS..=MAX_SEATS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatCount(u8);

impl SeatCount {
    /// Creates a validated seat count.
    pub fn new(value: i64) -> AppResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|seats| (MIN_SEATS..=MAX_SEATS).contains(seats))
            .map(Self)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "seats must be between {MIN_SEATS} and {MAX_SEATS}, got {value}"
                ))
            })
    }

    /// Returns the seat count.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Occupancy state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// Free to be seated.
    Available,
    /// Guests are seated.
    Occupied,
    /// Held for an upcoming party.
    Reserved,
}

impl TableStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }

    /// Parses a storage or request string into a status.
    ///
    /// `free` is the legacy spelling of `available`.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "available" | "free" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "reserved" => Ok(Self::Reserved),
            _ => Err(AppError::Validation(format!(
                "unknown table status '{value}', expected one of available, occupied, reserved"
            ))),
        }
    }
}

/// Seating unit belonging to exactly one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    id: NonEmptyString,
    location_id: NonEmptyString,
    code: NonEmptyString,
    seats: SeatCount,
    status: TableStatus,
    is_active: bool,
    timestamps: Timestamps,
}

impl Table {
    /// Creates a new active, available table.
    pub fn new(
        id: impl Into<String>,
        location_id: impl Into<String>,
        code: impl Into<String>,
        seats: i64,
    ) -> AppResult<Self> {
        Self::hydrate(
            id,
            location_id,
            code,
            seats,
            TableStatus::Available,
            true,
            Timestamps::now(),
        )
    }

    /// Rebuilds a table from persisted state.
    pub fn hydrate(
        id: impl Into<String>,
        location_id: impl Into<String>,
        code: impl Into<String>,
        seats: i64,
        status: TableStatus,
        is_active: bool,
        timestamps: Timestamps,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::for_field("id", id)?,
            location_id: NonEmptyString::for_field("location_id", location_id)?,
            code: NonEmptyString::for_field("code", code)?,
            seats: SeatCount::new(seats)?,
            status,
            is_active,
            timestamps,
        })
    }

    /// Returns a copy with the patch applied and the update instant moved.
    pub fn apply_patch(&self, patch: TablePatch) -> AppResult<Self> {
        let mut updated = self.clone();

        if let Some(code) = non_blank(patch.code) {
            updated.code = NonEmptyString::for_field("code", code)?;
        }
        if let Some(seats) = patch.seats {
            updated.seats = SeatCount::new(seats)?;
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }
        if let Some(is_active) = patch.is_active {
            updated.is_active = is_active;
        }

        updated.timestamps = self.timestamps.touched();
        Ok(updated)
    }

    /// Returns a copy with timestamps replaced by the stored values.
    #[must_use]
    pub fn with_timestamps(mut self, timestamps: Timestamps) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the owning location identifier.
    #[must_use]
    pub fn location_id(&self) -> &NonEmptyString {
        &self.location_id
    }

    /// Returns the code, unique within the location.
    #[must_use]
    pub fn code(&self) -> &NonEmptyString {
        &self.code
    }

    /// Returns the seat count.
    #[must_use]
    pub fn seats(&self) -> SeatCount {
        self.seats
    }

    /// Returns the occupancy status.
    #[must_use]
    pub fn status(&self) -> TableStatus {
        self.status
    }

    /// Returns whether the table is listed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns creation and update instants.
    #[must_use]
    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }
}

/// Partial table update. Absent or blank values keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePatch {
    /// New code.
    pub code: Option<String>,
    /// New seat count.
    pub seats: Option<i64>,
    /// New status.
    pub status: Option<TableStatus>,
    /// New active flag.
    pub is_active: Option<bool>,
}
