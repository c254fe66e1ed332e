use async_trait::async_trait;
use venue_core::AppResult;
use venue_domain::{Location, Table, TableStatus};

/// Repository port for location and table persistence.
///
/// Every mutation is a single atomic statement. Listing methods return only
/// active rows; direct lookups return rows regardless of the active flag.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Inserts a location and returns it with stored timestamps.
    ///
    /// Fails with `Conflict` when the code is already taken.
    async fn create_location(&self, location: Location) -> AppResult<Location>;

    /// Lists every active location, newest first.
    async fn list_active_locations(&self) -> AppResult<Vec<Location>>;

    /// Lists active locations whose identifier is in `ids`, in no particular order.
    async fn list_active_locations_by_ids(&self, ids: &[String]) -> AppResult<Vec<Location>>;

    /// Finds a location by identifier, active or not.
    async fn find_location(&self, id: &str) -> AppResult<Option<Location>>;

    /// Persists all mutable location fields and returns the stored row.
    ///
    /// Fails with `NotFound` for unknown ids and `Conflict` on duplicate code.
    async fn update_location(&self, location: Location) -> AppResult<Location>;

    /// Clears the active flag of a location.
    async fn deactivate_location(&self, id: &str) -> AppResult<()>;

    /// Inserts a table and returns it with stored timestamps.
    ///
    /// Fails with `NotFound` when the owning location does not exist and
    /// `Conflict` when the code is taken within that location.
    async fn create_table(&self, table: Table) -> AppResult<Table>;

    /// Lists active tables of one location ordered by code.
    async fn list_active_tables_for_location(&self, location_id: &str) -> AppResult<Vec<Table>>;

    /// Finds a table by identifier, active or not.
    async fn find_table(&self, id: &str) -> AppResult<Option<Table>>;

    /// Persists all mutable table fields and returns the stored row.
    async fn update_table(&self, table: Table) -> AppResult<Table>;

    /// Clears the active flag of a table.
    async fn deactivate_table(&self, id: &str) -> AppResult<()>;

    /// Verifies the storage backend is reachable.
    async fn ping(&self) -> AppResult<()>;
}

/// Port for capability questions answered by the external identity service.
///
/// Implementations make a single attempt per call with a bounded timeout.
/// Callers only distinguish success from failure; error content is for logs.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Returns whether the caller holds the `admin` role.
    async fn is_admin(&self, caller_id: &str, credential: &str) -> AppResult<bool>;

    /// Returns the location identifiers assigned to the caller.
    ///
    /// A caller without assignments yields an empty list, not an error.
    async fn assigned_location_ids(
        &self,
        caller_id: &str,
        credential: &str,
    ) -> AppResult<Vec<String>>;
}

/// Input payload for location creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLocationInput {
    /// Unique short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
}

/// Input payload for location updates. Absent or blank fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateLocationInput {
    /// New code.
    pub code: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Input payload for table creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableInput {
    /// Owning location identifier.
    pub location_id: String,
    /// Code, unique within the location.
    pub code: String,
    /// Seat count in `1..=20`.
    pub seats: i64,
}

/// Input payload for table updates. Absent or blank fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTableInput {
    /// New code.
    pub code: Option<String>,
    /// New seat count.
    pub seats: Option<i64>,
    /// New status.
    pub status: Option<TableStatus>,
    /// New active flag.
    pub is_active: Option<bool>,
}
