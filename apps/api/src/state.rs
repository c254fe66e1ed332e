use std::sync::Arc;

use venue_application::VenueService;

use crate::auth::BearerTokenVerifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub venue_service: VenueService,
    pub token_verifier: Arc<BearerTokenVerifier>,
}
