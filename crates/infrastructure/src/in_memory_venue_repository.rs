use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use venue_application::VenueRepository;
use venue_core::{AppError, AppResult};
use venue_domain::{Location, Table, Timestamps};

/// In-memory venue repository with the same constraints as the PostgreSQL schema.
#[derive(Debug, Default)]
pub struct InMemoryVenueRepository {
    locations: RwLock<HashMap<String, Location>>,
    tables: RwLock<HashMap<String, Table>>,
}

impl InMemoryVenueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(values: &mut [Location]) {
    values.sort_by(|left, right| {
        right
            .timestamps()
            .created_at
            .cmp(&left.timestamps().created_at)
            .then_with(|| left.id().cmp(right.id()))
    });
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn create_location(&self, location: Location) -> AppResult<Location> {
        let mut locations = self.locations.write().await;

        if locations.contains_key(location.id().as_str()) {
            return Err(AppError::Conflict(format!(
                "location '{}' already exists",
                location.id()
            )));
        }
        if locations
            .values()
            .any(|stored| stored.code() == location.code())
        {
            return Err(AppError::Conflict(format!(
                "location code '{}' already exists",
                location.code()
            )));
        }

        let location = location.with_timestamps(Timestamps::now());
        locations.insert(location.id().as_str().to_owned(), location.clone());
        Ok(location)
    }

    async fn list_active_locations(&self) -> AppResult<Vec<Location>> {
        let mut values: Vec<Location> = self
            .locations
            .read()
            .await
            .values()
            .filter(|location| location.is_active())
            .cloned()
            .collect();
        newest_first(&mut values);

        Ok(values)
    }

    async fn list_active_locations_by_ids(&self, ids: &[String]) -> AppResult<Vec<Location>> {
        let locations = self.locations.read().await;
        let mut values: Vec<Location> = ids
            .iter()
            .filter_map(|id| locations.get(id))
            .filter(|location| location.is_active())
            .cloned()
            .collect();
        newest_first(&mut values);
        values.dedup_by(|left, right| left.id() == right.id());

        Ok(values)
    }

    async fn find_location(&self, id: &str) -> AppResult<Option<Location>> {
        Ok(self.locations.read().await.get(id).cloned())
    }

    async fn update_location(&self, location: Location) -> AppResult<Location> {
        let mut locations = self.locations.write().await;

        let Some(stored) = locations.get(location.id().as_str()) else {
            return Err(AppError::NotFound(format!(
                "location '{}' not found",
                location.id()
            )));
        };
        let created_at = stored.timestamps().created_at;

        if locations
            .values()
            .any(|other| other.id() != location.id() && other.code() == location.code())
        {
            return Err(AppError::Conflict(format!(
                "location code '{}' already exists",
                location.code()
            )));
        }

        let location = location.with_timestamps(Timestamps {
            created_at,
            updated_at: chrono::Utc::now(),
        });
        locations.insert(location.id().as_str().to_owned(), location.clone());
        Ok(location)
    }

    async fn deactivate_location(&self, id: &str) -> AppResult<()> {
        let mut locations = self.locations.write().await;
        let stored = locations
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("location '{id}' not found")))?;

        let deactivated = stored.apply_patch(venue_domain::LocationPatch {
            is_active: Some(false),
            ..Default::default()
        })?;
        locations.insert(id.to_owned(), deactivated);
        Ok(())
    }

    async fn create_table(&self, table: Table) -> AppResult<Table> {
        if !self
            .locations
            .read()
            .await
            .contains_key(table.location_id().as_str())
        {
            return Err(AppError::NotFound(format!(
                "failed to create table: location '{}' does not exist",
                table.location_id()
            )));
        }

        let mut tables = self.tables.write().await;
        if tables.contains_key(table.id().as_str()) {
            return Err(AppError::Conflict(format!(
                "table '{}' already exists",
                table.id()
            )));
        }
        if tables.values().any(|stored| {
            stored.location_id() == table.location_id() && stored.code() == table.code()
        }) {
            return Err(AppError::Conflict(format!(
                "table code '{}' already exists in location '{}'",
                table.code(),
                table.location_id()
            )));
        }

        let table = table.with_timestamps(Timestamps::now());
        tables.insert(table.id().as_str().to_owned(), table.clone());
        Ok(table)
    }

    async fn list_active_tables_for_location(&self, location_id: &str) -> AppResult<Vec<Table>> {
        let mut values: Vec<Table> = self
            .tables
            .read()
            .await
            .values()
            .filter(|table| table.is_active() && table.location_id().as_str() == location_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| left.code().cmp(right.code()));

        Ok(values)
    }

    async fn find_table(&self, id: &str) -> AppResult<Option<Table>> {
        Ok(self.tables.read().await.get(id).cloned())
    }

    async fn update_table(&self, table: Table) -> AppResult<Table> {
        let mut tables = self.tables.write().await;

        let Some(stored) = tables.get(table.id().as_str()) else {
            return Err(AppError::NotFound(format!("table '{}' not found", table.id())));
        };
        let created_at = stored.timestamps().created_at;

        if tables.values().any(|other| {
            other.id() != table.id()
                && other.location_id() == table.location_id()
                && other.code() == table.code()
        }) {
            return Err(AppError::Conflict(format!(
                "table code '{}' already exists in location '{}'",
                table.code(),
                table.location_id()
            )));
        }

        let table = table.with_timestamps(Timestamps {
            created_at,
            updated_at: chrono::Utc::now(),
        });
        tables.insert(table.id().as_str().to_owned(), table.clone());
        Ok(table)
    }

    async fn deactivate_table(&self, id: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("table '{id}' not found")))?;

        let deactivated = stored.apply_patch(venue_domain::TablePatch {
            is_active: Some(false),
            ..Default::default()
        })?;
        tables.insert(id.to_owned(), deactivated);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
