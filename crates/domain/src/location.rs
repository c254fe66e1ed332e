use serde::{Deserialize, Serialize};
use venue_core::{AppResult, NonEmptyString};

use crate::{Timestamps, non_blank};

/// Physical venue that owns a set of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    id: NonEmptyString,
    code: NonEmptyString,
    name: NonEmptyString,
    address: NonEmptyString,
    is_active: bool,
    timestamps: Timestamps,
}

impl Location {
    /// Creates a new active location.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> AppResult<Self> {
        Self::hydrate(id, code, name, address, true, Timestamps::now())
    }

    /// Rebuilds a location from persisted state.
    pub fn hydrate(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        is_active: bool,
        timestamps: Timestamps,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::for_field("id", id)?,
            code: NonEmptyString::for_field("code", code)?,
            name: NonEmptyString::for_field("name", name)?,
            address: NonEmptyString::for_field("address", address)?,
            is_active,
            timestamps,
        })
    }

    /// Returns a copy with the patch applied and the update instant moved.
    pub fn apply_patch(&self, patch: LocationPatch) -> AppResult<Self> {
        let mut updated = self.clone();

        if let Some(code) = non_blank(patch.code) {
            updated.code = NonEmptyString::for_field("code", code)?;
        }
        if let Some(name) = non_blank(patch.name) {
            updated.name = NonEmptyString::for_field("name", name)?;
        }
        if let Some(address) = non_blank(patch.address) {
            updated.address = NonEmptyString::for_field("address", address)?;
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

    /// Returns the unique short code.
    #[must_use]
    pub fn code(&self) -> &NonEmptyString {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the street address.
    #[must_use]
    pub fn address(&self) -> &NonEmptyString {
        &self.address
    }

    /// Returns whether the location is listed.
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

/// Partial location update. Absent or blank values keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPatch {
    /// New code.
    pub code: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}
