use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use venue_core::{AppError, AppResult, CallerContext};
use venue_domain::{Location, Table, TableStatus};

use crate::{
    AccessResolver, CreateLocationInput, CreateTableInput, IdentityGateway, UpdateLocationInput,
    UpdateTableInput, VenueRepository,
};

use super::VenueService;

#[derive(Default)]
struct FakeVenueRepository {
    locations: Mutex<Vec<Location>>,
    tables: Mutex<Vec<Table>>,
    by_ids_requests: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl VenueRepository for FakeVenueRepository {
    async fn create_location(&self, location: Location) -> AppResult<Location> {
        let mut locations = self.locations.lock().await;
        if locations.iter().any(|stored| stored.code() == location.code()) {
            return Err(AppError::Conflict("duplicate code".to_owned()));
        }
        locations.push(location.clone());
        Ok(location)
    }

    async fn list_active_locations(&self) -> AppResult<Vec<Location>> {
        Ok(self
            .locations
            .lock()
            .await
            .iter()
            .filter(|location| location.is_active())
            .cloned()
            .collect())
    }

    async fn list_active_locations_by_ids(&self, ids: &[String]) -> AppResult<Vec<Location>> {
        self.by_ids_requests.lock().await.push(ids.to_vec());
        Ok(self
            .locations
            .lock()
            .await
            .iter()
            .filter(|location| {
                location.is_active() && ids.iter().any(|id| id == location.id().as_str())
            })
            .cloned()
            .collect())
    }

    async fn find_location(&self, id: &str) -> AppResult<Option<Location>> {
        Ok(self
            .locations
            .lock()
            .await
            .iter()
            .find(|location| location.id().as_str() == id)
            .cloned())
    }

    async fn update_location(&self, location: Location) -> AppResult<Location> {
        let mut locations = self.locations.lock().await;
        let stored = locations
            .iter_mut()
            .find(|stored| stored.id() == location.id())
            .ok_or_else(|| AppError::NotFound("location".to_owned()))?;
        *stored = location.clone();
        Ok(location)
    }

    async fn deactivate_location(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn create_table(&self, table: Table) -> AppResult<Table> {
        self.tables.lock().await.push(table.clone());
        Ok(table)
    }

    async fn list_active_tables_for_location(&self, location_id: &str) -> AppResult<Vec<Table>> {
        Ok(self
            .tables
            .lock()
            .await
            .iter()
            .filter(|table| table.is_active() && table.location_id().as_str() == location_id)
            .cloned()
            .collect())
    }

    async fn find_table(&self, id: &str) -> AppResult<Option<Table>> {
        Ok(self
            .tables
            .lock()
            .await
            .iter()
            .find(|table| table.id().as_str() == id)
            .cloned())
    }

    async fn update_table(&self, table: Table) -> AppResult<Table> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .iter_mut()
            .find(|stored| stored.id() == table.id())
            .ok_or_else(|| AppError::NotFound("table".to_owned()))?;
        *stored = table.clone();
        Ok(table)
    }

    async fn deactivate_table(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

struct StaffGateway {
    assignments: Option<Vec<String>>,
}

#[async_trait]
impl IdentityGateway for StaffGateway {
    async fn is_admin(&self, _caller_id: &str, _credential: &str) -> AppResult<bool> {
        Ok(false)
    }

    async fn assigned_location_ids(
        &self,
        _caller_id: &str,
        _credential: &str,
    ) -> AppResult<Vec<String>> {
        self.assignments
            .clone()
            .ok_or_else(|| AppError::Internal("identity service unreachable".to_owned()))
    }
}

async fn seeded_service(
    assignments: Option<Vec<String>>,
) -> (VenueService, Arc<FakeVenueRepository>, Vec<Location>) {
    let repository = Arc::new(FakeVenueRepository::default());
    let service = VenueService::new(
        repository.clone(),
        AccessResolver::new(Arc::new(StaffGateway { assignments })),
    );

    let mut locations = Vec::new();
    for (code, name) in [("BAR-A", "Harbour"), ("BAR-B", "Rooftop"), ("BAR-C", "Cellar")] {
        let created = service
            .create_location(CreateLocationInput {
                code: code.to_owned(),
                name: name.to_owned(),
                address: format!("{name} street"),
            })
            .await;
        let Ok(location) = created else {
            panic!("failed to seed location {code}");
        };
        locations.push(location);
    }

    (service, repository, locations)
}

fn ids(locations: &[Location]) -> Vec<String> {
    let mut ids: Vec<String> = locations
        .iter()
        .map(|location| location.id().as_str().to_owned())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn anonymous_listing_returns_every_active_location() {
    let (service, _, seeded) = seeded_service(Some(Vec::new())).await;

    let listed = service.list_locations(&CallerContext::anonymous()).await;
    assert_eq!(listed.map(|values| ids(&values)).ok(), Some(ids(&seeded)));
}

#[tokio::test]
async fn restricted_listing_returns_exactly_the_assigned_locations() {
    let (service, repository, seeded) = seeded_service(None).await;
    let assigned = vec![
        seeded[0].id().as_str().to_owned(),
        seeded[2].id().as_str().to_owned(),
        "loc-unknown".to_owned(),
    ];
    let service = VenueService::new(
        repository.clone(),
        AccessResolver::new(Arc::new(StaffGateway {
            assignments: Some(assigned),
        })),
    );

    let listed = service
        .list_locations(&CallerContext::authenticated("u1", "t1"))
        .await;

    assert_eq!(
        listed.map(|values| ids(&values)).ok(),
        Some(ids(&[seeded[0].clone(), seeded[2].clone()]))
    );
}

#[tokio::test]
async fn empty_restriction_skips_the_storage_lookup() {
    let (service, repository, _) = seeded_service(Some(Vec::new())).await;

    let listed = service
        .list_locations(&CallerContext::authenticated("u2", "t2"))
        .await;

    assert!(listed.map(|values| values.is_empty()).unwrap_or(false));
    assert!(repository.by_ids_requests.lock().await.is_empty());
}

#[tokio::test]
async fn assignment_outage_lists_no_locations() {
    let (service, _, _) = seeded_service(None).await;

    let listed = service
        .list_locations(&CallerContext::authenticated("u1", "t1"))
        .await;

    assert!(listed.map(|values| values.is_empty()).unwrap_or(false));
}

#[tokio::test]
async fn table_listing_is_forbidden_outside_assignments() {
    let (service, _, seeded) = seeded_service(None).await;
    let assigned = seeded[0].id().as_str().to_owned();
    let service = VenueService::new(
        Arc::new(FakeVenueRepository::default()),
        AccessResolver::new(Arc::new(StaffGateway {
            assignments: Some(vec![assigned.clone()]),
        })),
    );
    let caller = CallerContext::authenticated("u1", "t1");

    let denied = service
        .list_tables_for_location(seeded[1].id().as_str(), &caller)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let allowed = service
        .list_tables_for_location(assigned.as_str(), &caller)
        .await;
    assert!(allowed.is_ok());
}

#[tokio::test]
async fn table_listing_rejects_blank_location_id() {
    let (service, _, _) = seeded_service(Some(Vec::new())).await;

    let result = service
        .list_tables_for_location("  ", &CallerContext::anonymous())
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn created_table_starts_available_and_status_can_change() {
    let (service, _, seeded) = seeded_service(Some(Vec::new())).await;

    let created = service
        .create_table(CreateTableInput {
            location_id: seeded[0].id().as_str().to_owned(),
            code: "T1".to_owned(),
            seats: 4,
        })
        .await;
    let Ok(table) = created else {
        panic!("table creation failed");
    };
    assert_eq!(table.status(), TableStatus::Available);

    let updated = service
        .update_table_status(table.id().as_str(), TableStatus::Occupied)
        .await;
    assert_eq!(
        updated.map(|table| table.status()).ok(),
        Some(TableStatus::Occupied)
    );
}

#[tokio::test]
async fn create_table_validates_seat_bounds() {
    let (service, _, seeded) = seeded_service(Some(Vec::new())).await;

    let result = service
        .create_table(CreateTableInput {
            location_id: seeded[0].id().as_str().to_owned(),
            code: "T9".to_owned(),
            seats: 0,
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn updates_of_unknown_entities_are_not_found() {
    let (service, _, _) = seeded_service(Some(Vec::new())).await;

    let location = service
        .update_location("missing", UpdateLocationInput::default())
        .await;
    assert!(matches!(location, Err(AppError::NotFound(_))));

    let table = service
        .update_table("missing", UpdateTableInput::default())
        .await;
    assert!(matches!(table, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn update_location_keeps_blank_fields() {
    let (service, _, seeded) = seeded_service(Some(Vec::new())).await;

    let updated = service
        .update_location(
            seeded[1].id().as_str(),
            UpdateLocationInput {
                name: Some("Sky Bar".to_owned()),
                address: Some(String::new()),
                ..UpdateLocationInput::default()
            },
        )
        .await;
    let Ok(updated) = updated else {
        panic!("location update failed");
    };

    assert_eq!(updated.name().as_str(), "Sky Bar");
    assert_eq!(updated.address().as_str(), "Rooftop street");
    assert_eq!(updated.code().as_str(), "BAR-B");
}
