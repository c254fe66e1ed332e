use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use venue_application::VenueRepository;
use venue_core::{AppError, AppResult};
use venue_domain::{Location, Table, TableStatus, Timestamps};

/// PostgreSQL-backed location and table repository.
#[derive(Clone)]
pub struct PostgresVenueRepository {
    pool: PgPool,
}

impl PostgresVenueRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: String,
    code: String,
    name: String,
    address: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LocationRow> for Location {
    type Error = AppError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        Location::hydrate(
            row.id,
            row.code,
            row.name,
            row.address,
            row.is_active,
            Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct TableRow {
    id: String,
    location_id: String,
    code: String,
    seats: i16,
    status: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TableRow> for Table {
    type Error = AppError;

    fn try_from(row: TableRow) -> Result<Self, Self::Error> {
        Table::hydrate(
            row.id,
            row.location_id,
            row.code,
            i64::from(row.seats),
            TableStatus::parse(row.status.as_str())?,
            row.is_active,
            Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct TimestampsRow {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TimestampsRow> for Timestamps {
    fn from(row: TimestampsRow) -> Self {
        Self {
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const LOCATION_COLUMNS: &str = "id, code, name, address, is_active, created_at, updated_at";
const TABLE_COLUMNS: &str =
    "id, location_id, code, seats, status, is_active, created_at, updated_at";

#[async_trait]
impl VenueRepository for PostgresVenueRepository {
    async fn create_location(&self, location: Location) -> AppResult<Location> {
        let stored = sqlx::query_as::<_, TimestampsRow>(
            r#"
            INSERT INTO locations (id, code, name, address, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(location.id().as_str())
        .bind(location.code().as_str())
        .bind(location.name().as_str())
        .bind(location.address().as_str())
        .bind(location.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                format!("location code '{}' already exists", location.code()),
                "create location",
            )
        })?;

        Ok(location.with_timestamps(stored.into()))
    }

    async fn list_active_locations(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            SELECT {LOCATION_COLUMNS}
            FROM locations
            WHERE is_active = TRUE
            ORDER BY created_at DESC, id
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list locations: {error}")))?;

        rows.into_iter().map(Location::try_from).collect()
    }

    async fn list_active_locations_by_ids(&self, ids: &[String]) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            SELECT {LOCATION_COLUMNS}
            FROM locations
            WHERE id = ANY($1) AND is_active = TRUE
            ORDER BY created_at DESC, id
            "#
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list assigned locations: {error}"))
        })?;

        rows.into_iter().map(Location::try_from).collect()
    }

    async fn find_location(&self, id: &str) -> AppResult<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            SELECT {LOCATION_COLUMNS}
            FROM locations
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find location '{id}': {error}")))?;

        row.map(Location::try_from).transpose()
    }

    async fn update_location(&self, location: Location) -> AppResult<Location> {
        let stored = sqlx::query_as::<_, TimestampsRow>(
            r#"
            UPDATE locations
            SET code = $2, name = $3, address = $4, is_active = $5, updated_at = now()
            WHERE id = $1
            RETURNING created_at, updated_at
            "#,
        )
        .bind(location.id().as_str())
        .bind(location.code().as_str())
        .bind(location.name().as_str())
        .bind(location.address().as_str())
        .bind(location.is_active())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                format!("location code '{}' already exists", location.code()),
                "update location",
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("location '{}' not found", location.id())))?;

        Ok(location.with_timestamps(stored.into()))
    }

    async fn deactivate_location(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET is_active = FALSE, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete location '{id}': {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("location '{id}' not found")));
        }

        Ok(())
    }

    async fn create_table(&self, table: Table) -> AppResult<Table> {
        let stored = sqlx::query_as::<_, TimestampsRow>(
            r#"
            INSERT INTO venue_tables (id, location_id, code, seats, status, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(table.id().as_str())
        .bind(table.location_id().as_str())
        .bind(table.code().as_str())
        .bind(i16::from(table.seats().get()))
        .bind(table.status().as_str())
        .bind(table.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                format!(
                    "table code '{}' already exists in location '{}'",
                    table.code(),
                    table.location_id()
                ),
                "create table",
            )
        })?;

        Ok(table.with_timestamps(stored.into()))
    }

    async fn list_active_tables_for_location(&self, location_id: &str) -> AppResult<Vec<Table>> {
        let rows = sqlx::query_as::<_, TableRow>(&format!(
            r#"
            SELECT {TABLE_COLUMNS}
            FROM venue_tables
            WHERE location_id = $1 AND is_active = TRUE
            ORDER BY code
            "#
        ))
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list tables for location '{location_id}': {error}"
            ))
        })?;

        rows.into_iter().map(Table::try_from).collect()
    }

    async fn find_table(&self, id: &str) -> AppResult<Option<Table>> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            r#"
            SELECT {TABLE_COLUMNS}
            FROM venue_tables
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find table '{id}': {error}")))?;

        row.map(Table::try_from).transpose()
    }

    async fn update_table(&self, table: Table) -> AppResult<Table> {
        let stored = sqlx::query_as::<_, TimestampsRow>(
            r#"
            UPDATE venue_tables
            SET code = $2, seats = $3, status = $4, is_active = $5, updated_at = now()
            WHERE id = $1
            RETURNING created_at, updated_at
            "#,
        )
        .bind(table.id().as_str())
        .bind(table.code().as_str())
        .bind(i16::from(table.seats().get()))
        .bind(table.status().as_str())
        .bind(table.is_active())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                format!(
                    "table code '{}' already exists in location '{}'",
                    table.code(),
                    table.location_id()
                ),
                "update table",
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("table '{}' not found", table.id())))?;

        Ok(table.with_timestamps(stored.into()))
    }

    async fn deactivate_table(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE venue_tables
            SET is_active = FALSE, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete table '{id}': {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("table '{id}' not found")));
        }

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("postgres check failed: {error}")))?;

        Ok(())
    }
}

/// Maps constraint violations to tagged errors; everything else is internal.
fn map_write_error(error: sqlx::Error, conflict_message: String, action: &str) -> AppError {
    if let Some(database_error) = error.as_database_error() {
        if database_error.is_unique_violation() {
            return AppError::Conflict(conflict_message);
        }
        if database_error.is_foreign_key_violation() {
            return AppError::NotFound(format!(
                "failed to {action}: referenced location does not exist"
            ));
        }
        if database_error.is_check_violation() {
            return AppError::Validation(format!(
                "failed to {action}: {}",
                database_error.message()
            ));
        }
    }

    AppError::Internal(format!("failed to {action}: {error}"))
}
