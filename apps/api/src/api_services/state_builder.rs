use std::sync::Arc;

use sqlx::PgPool;
use venue_application::{AccessResolver, VenueService};
use venue_core::AppError;
use venue_infrastructure::{HttpIdentityGateway, IdentityGatewayConfig, PostgresVenueRepository};

use crate::api_config::ApiConfig;
use crate::auth::BearerTokenVerifier;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let identity_gateway = HttpIdentityGateway::new(IdentityGatewayConfig {
        base_url: config.auth_service_url.clone(),
        timeout: config.auth_service_timeout,
    })?;

    let venue_service = VenueService::new(
        Arc::new(PostgresVenueRepository::new(pool)),
        AccessResolver::new(Arc::new(identity_gateway)),
    );

    Ok(AppState {
        venue_service,
        token_verifier: Arc::new(BearerTokenVerifier::new(config.jwt_secret.as_str())),
    })
}
