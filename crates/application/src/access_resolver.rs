use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;
use venue_core::{AppError, AppResult, CallerContext};

use crate::IdentityGateway;

/// Which locations a location listing may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationVisibility {
    /// Every active location.
    All,
    /// Only active locations whose identifier is in the set.
    Restricted(BTreeSet<String>),
}

impl LocationVisibility {
    /// Returns whether a location identifier is visible.
    #[must_use]
    pub fn allows(&self, location_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Restricted(location_ids) => location_ids.contains(location_id),
        }
    }
}

/// Decision for listing the tables of one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAccess {
    /// Tables may be returned.
    Allow,
    /// Caller is not assigned to the location.
    Deny,
}

/// Resolves caller-scoped visibility of locations and tables.
///
/// Failure policy differs per path:
///
/// | Path | Admin check fails | Assignment check fails | Anonymous |
/// |---|---|---|---|
/// | location listing | all | none | all |
/// | table listing | allow | allow | allow |
#[derive(Clone)]
pub struct AccessResolver {
    identity_gateway: Arc<dyn IdentityGateway>,
}

impl AccessResolver {
    /// Creates a resolver backed by an identity gateway.
    #[must_use]
    pub fn new(identity_gateway: Arc<dyn IdentityGateway>) -> Self {
        Self { identity_gateway }
    }

    /// Decides which locations the caller may list.
    pub async fn resolve_location_visibility(&self, caller: &CallerContext) -> LocationVisibility {
        let Some((caller_id, credential)) = caller.identity() else {
            return LocationVisibility::All;
        };

        match self.check_admin(caller_id, credential, "location listing").await {
            AdminCheck::Admin | AdminCheck::Unavailable => LocationVisibility::All,
            AdminCheck::Regular => {
                match self
                    .identity_gateway
                    .assigned_location_ids(caller_id, credential)
                    .await
                {
                    Ok(location_ids) => {
                        LocationVisibility::Restricted(location_ids.into_iter().collect())
                    }
                    Err(error) => {
                        warn!(
                            error = %error,
                            caller_id = %caller_id,
                            "location assignment lookup failed, listing no locations"
                        );
                        LocationVisibility::Restricted(BTreeSet::new())
                    }
                }
            }
        }
    }

    /// Decides whether the caller may list the tables of a location.
    pub async fn resolve_table_access(
        &self,
        location_id: &str,
        caller: &CallerContext,
    ) -> TableAccess {
        let Some((caller_id, credential)) = caller.identity() else {
            return TableAccess::Allow;
        };

        match self.check_admin(caller_id, credential, "table listing").await {
            AdminCheck::Admin | AdminCheck::Unavailable => TableAccess::Allow,
            AdminCheck::Regular => {
                match self
                    .identity_gateway
                    .assigned_location_ids(caller_id, credential)
                    .await
                {
                    Ok(location_ids) if location_ids.iter().any(|id| id == location_id) => {
                        TableAccess::Allow
                    }
                    Ok(_) => TableAccess::Deny,
                    Err(error) => {
                        warn!(
                            error = %error,
                            caller_id = %caller_id,
                            location_id = %location_id,
                            "location assignment lookup failed, allowing table listing"
                        );
                        TableAccess::Allow
                    }
                }
            }
        }
    }

    /// Fails with `Forbidden` when the caller may not list the location's tables.
    pub async fn require_table_access(
        &self,
        location_id: &str,
        caller: &CallerContext,
    ) -> AppResult<()> {
        match self.resolve_table_access(location_id, caller).await {
            TableAccess::Allow => Ok(()),
            TableAccess::Deny => Err(AppError::Forbidden(format!(
                "access denied: caller '{}' is not assigned to location '{location_id}'",
                caller.caller_id().unwrap_or_default()
            ))),
        }
    }

    async fn check_admin(&self, caller_id: &str, credential: &str, path: &str) -> AdminCheck {
        match self.identity_gateway.is_admin(caller_id, credential).await {
            Ok(true) => AdminCheck::Admin,
            Ok(false) => AdminCheck::Regular,
            Err(error) => {
                warn!(
                    error = %error,
                    caller_id = %caller_id,
                    path = %path,
                    "admin check failed, granting unrestricted access"
                );
                AdminCheck::Unavailable
            }
        }
    }
}

enum AdminCheck {
    Admin,
    Regular,
    Unavailable,
}

#[cfg(test)]
mod tests;
