use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use venue_core::{AppError, AppResult, CallerContext};

use crate::IdentityGateway;

use super::{AccessResolver, LocationVisibility, TableAccess};

/// Gateway fake. `None` replies simulate an unreachable identity service.
struct FakeIdentityGateway {
    admin: Option<bool>,
    assignments: Option<Vec<String>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeIdentityGateway {
    fn new(admin: Option<bool>, assignments: Option<Vec<&str>>) -> Arc<Self> {
        Arc::new(Self {
            admin,
            assignments: assignments
                .map(|ids| ids.into_iter().map(str::to_owned).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl IdentityGateway for FakeIdentityGateway {
    async fn is_admin(&self, _caller_id: &str, _credential: &str) -> AppResult<bool> {
        self.calls.lock().await.push("is_admin");
        self.admin
            .ok_or_else(|| AppError::Internal("identity service timed out".to_owned()))
    }

    async fn assigned_location_ids(
        &self,
        _caller_id: &str,
        _credential: &str,
    ) -> AppResult<Vec<String>> {
        self.calls.lock().await.push("assigned_location_ids");
        self.assignments
            .clone()
            .ok_or_else(|| AppError::Internal("identity service returned status 502".to_owned()))
    }
}

fn restricted(ids: &[&str]) -> LocationVisibility {
    LocationVisibility::Restricted(ids.iter().map(|id| (*id).to_owned()).collect())
}

#[tokio::test]
async fn anonymous_callers_see_everything_without_calling_the_gateway() {
    let gateway = FakeIdentityGateway::new(None, None);
    let resolver = AccessResolver::new(gateway.clone());

    for caller in [
        CallerContext::anonymous(),
        CallerContext::new(Some("u1".to_owned()), None),
        CallerContext::new(None, Some("t1".to_owned())),
    ] {
        assert_eq!(
            resolver.resolve_location_visibility(&caller).await,
            LocationVisibility::All
        );
        assert_eq!(
            resolver.resolve_table_access("loc-A", &caller).await,
            TableAccess::Allow
        );
    }

    assert!(gateway.calls.lock().await.is_empty());
}

#[tokio::test]
async fn admins_see_everything_and_skip_the_assignment_lookup() {
    let gateway = FakeIdentityGateway::new(Some(true), Some(vec![]));
    let resolver = AccessResolver::new(gateway.clone());
    let caller = CallerContext::authenticated("admin-1", "t-admin");

    assert_eq!(
        resolver.resolve_location_visibility(&caller).await,
        LocationVisibility::All
    );
    assert_eq!(
        resolver.resolve_table_access("loc-Z", &caller).await,
        TableAccess::Allow
    );
    assert_eq!(*gateway.calls.lock().await, vec!["is_admin", "is_admin"]);
}

#[tokio::test]
async fn regular_callers_are_restricted_to_assigned_locations() {
    let gateway = FakeIdentityGateway::new(Some(false), Some(vec!["loc-A", "loc-C"]));
    let resolver = AccessResolver::new(gateway.clone());
    let caller = CallerContext::authenticated("u1", "t1");

    assert_eq!(
        resolver.resolve_location_visibility(&caller).await,
        restricted(&["loc-A", "loc-C"])
    );
    assert_eq!(
        *gateway.calls.lock().await,
        vec!["is_admin", "assigned_location_ids"]
    );
}

#[tokio::test]
async fn staff_caller_is_denied_tables_of_unassigned_location() {
    let gateway = FakeIdentityGateway::new(Some(false), Some(vec!["loc-A"]));
    let resolver = AccessResolver::new(gateway);
    let caller = CallerContext::authenticated("u1", "t1");

    assert_eq!(
        resolver.resolve_table_access("loc-B", &caller).await,
        TableAccess::Deny
    );
    assert_eq!(
        resolver.resolve_table_access("loc-A", &caller).await,
        TableAccess::Allow
    );

    let denied = resolver.require_table_access("loc-B", &caller).await;
    assert!(matches!(denied, Err(AppError::Forbidden(message)) if message.contains("access denied")));
}

#[tokio::test]
async fn caller_without_assignments_lists_no_locations() {
    let gateway = FakeIdentityGateway::new(Some(false), Some(vec![]));
    let resolver = AccessResolver::new(gateway);
    let caller = CallerContext::authenticated("u2", "t2");

    let visibility = resolver.resolve_location_visibility(&caller).await;
    assert_eq!(visibility, LocationVisibility::Restricted(BTreeSet::new()));
    assert!(!visibility.allows("loc-A"));
}

#[tokio::test]
async fn admin_check_failure_fails_open_on_both_paths() {
    let gateway = FakeIdentityGateway::new(None, Some(vec![]));
    let resolver = AccessResolver::new(gateway.clone());
    let caller = CallerContext::authenticated("u3", "t3");

    assert_eq!(
        resolver.resolve_location_visibility(&caller).await,
        LocationVisibility::All
    );
    assert_eq!(
        resolver.resolve_table_access("loc-anything", &caller).await,
        TableAccess::Allow
    );
    assert!(
        !gateway
            .calls
            .lock()
            .await
            .contains(&"assigned_location_ids")
    );
}

#[tokio::test]
async fn assignment_failure_fails_closed_for_locations_and_open_for_tables() {
    let gateway = FakeIdentityGateway::new(Some(false), None);
    let resolver = AccessResolver::new(gateway);
    let caller = CallerContext::authenticated("u4", "t4");

    assert_eq!(
        resolver.resolve_location_visibility(&caller).await,
        LocationVisibility::Restricted(BTreeSet::new())
    );
    assert_eq!(
        resolver.resolve_table_access("loc-A", &caller).await,
        TableAccess::Allow
    );
    assert!(resolver.require_table_access("loc-A", &caller).await.is_ok());
}
