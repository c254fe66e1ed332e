use std::sync::Arc;

use uuid::Uuid;
use venue_core::{AppError, AppResult, CallerContext};
use venue_domain::{Location, LocationPatch, Table, TablePatch, TableStatus};

use crate::access_resolver::{AccessResolver, LocationVisibility};
use crate::venue_ports::{
    CreateLocationInput, CreateTableInput, UpdateLocationInput, UpdateTableInput,
    VenueRepository,
};

/// Application service for locations and their tables.
#[derive(Clone)]
pub struct VenueService {
    repository: Arc<dyn VenueRepository>,
    access_resolver: AccessResolver,
}

impl VenueService {
    /// Creates a service from a repository and an access resolver.
    #[must_use]
    pub fn new(repository: Arc<dyn VenueRepository>, access_resolver: AccessResolver) -> Self {
        Self {
            repository,
            access_resolver,
        }
    }

    /// Creates an active location with a generated identifier.
    pub async fn create_location(&self, input: CreateLocationInput) -> AppResult<Location> {
        let location = Location::new(
            Uuid::new_v4().to_string(),
            input.code,
            input.name,
            input.address,
        )?;

        self.repository.create_location(location).await
    }

    /// Lists the active locations visible to the caller.
    pub async fn list_locations(&self, caller: &CallerContext) -> AppResult<Vec<Location>> {
        match self
            .access_resolver
            .resolve_location_visibility(caller)
            .await
        {
            LocationVisibility::All => self.repository.list_active_locations().await,
            LocationVisibility::Restricted(location_ids) if location_ids.is_empty() => {
                Ok(Vec::new())
            }
            LocationVisibility::Restricted(location_ids) => {
                let location_ids: Vec<String> = location_ids.into_iter().collect();
                self.repository
                    .list_active_locations_by_ids(&location_ids)
                    .await
            }
        }
    }

    /// Returns a location by identifier, including inactive ones.
    pub async fn get_location(&self, id: &str) -> AppResult<Location> {
        self.repository
            .find_location(id)
            .await?
            .ok_or_else(|| location_not_found(id))
    }

    /// Applies a partial update to a location.
    pub async fn update_location(
        &self,
        id: &str,
        input: UpdateLocationInput,
    ) -> AppResult<Location> {
        let location = self.get_location(id).await?.apply_patch(LocationPatch {
            code: input.code,
            name: input.name,
            address: input.address,
            is_active: input.is_active,
        })?;

        self.repository.update_location(location).await
    }

    /// Soft-deletes a location.
    pub async fn delete_location(&self, id: &str) -> AppResult<()> {
        self.repository.deactivate_location(id).await
    }

    /// Creates an active, available table with a generated identifier.
    pub async fn create_table(&self, input: CreateTableInput) -> AppResult<Table> {
        let table = Table::new(
            Uuid::new_v4().to_string(),
            input.location_id,
            input.code,
            input.seats,
        )?;

        self.repository.create_table(table).await
    }

    /// Lists the active tables of a location, ordered by code.
    ///
    /// Fails with `Forbidden` when the caller is not assigned to the location.
    pub async fn list_tables_for_location(
        &self,
        location_id: &str,
        caller: &CallerContext,
    ) -> AppResult<Vec<Table>> {
        if location_id.trim().is_empty() {
            return Err(AppError::Validation(
                "location id is required".to_owned(),
            ));
        }

        self.access_resolver
            .require_table_access(location_id, caller)
            .await?;

        self.repository
            .list_active_tables_for_location(location_id)
            .await
    }

    /// Returns a table by identifier, including inactive ones.
    pub async fn get_table(&self, id: &str) -> AppResult<Table> {
        self.repository
            .find_table(id)
            .await?
            .ok_or_else(|| table_not_found(id))
    }

    /// Applies a partial update to a table.
    pub async fn update_table(&self, id: &str, input: UpdateTableInput) -> AppResult<Table> {
        let table = self.get_table(id).await?.apply_patch(TablePatch {
            code: input.code,
            seats: input.seats,
            status: input.status,
            is_active: input.is_active,
        })?;

        self.repository.update_table(table).await
    }

    /// Changes only the occupancy status of a table.
    pub async fn update_table_status(&self, id: &str, status: TableStatus) -> AppResult<Table> {
        self.update_table(
            id,
            UpdateTableInput {
                status: Some(status),
                ..UpdateTableInput::default()
            },
        )
        .await
    }

    /// Soft-deletes a table.
    pub async fn delete_table(&self, id: &str) -> AppResult<()> {
        self.repository.deactivate_table(id).await
    }

    /// Verifies the storage backend is reachable.
    pub async fn check_storage(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

fn location_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("location '{id}' not found"))
}

fn table_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("table '{id}' not found"))
}

#[cfg(test)]
mod tests;
