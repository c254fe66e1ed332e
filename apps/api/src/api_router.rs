use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use tower_http::trace::TraceLayer;
use venue_core::AppError;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    cors_allowed_origin: Option<&str>,
) -> Result<Router, AppError> {
    let venue_routes = Router::new()
        .route(
            "/api/venue/locations",
            get(handlers::locations::list_locations_handler)
                .post(handlers::locations::create_location_handler),
        )
        .route(
            "/api/venue/locations/{location_id}",
            get(handlers::locations::get_location_handler)
                .put(handlers::locations::update_location_handler)
                .delete(handlers::locations::delete_location_handler),
        )
        .route(
            "/api/venue/{location_id}/tables",
            get(handlers::tables::list_location_tables_handler),
        )
        .route(
            "/api/venue/tables",
            post(handlers::tables::create_table_handler),
        )
        .route(
            "/api/venue/tables/{table_id}",
            get(handlers::tables::get_table_handler)
                .put(handlers::tables::update_table_handler)
                .delete(handlers::tables::delete_table_handler),
        )
        .route(
            "/api/venue/tables/{table_id}/status",
            patch(handlers::tables::update_table_status_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(venue_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_caller,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(cors_allowed_origin)?)
        .with_state(app_state))
}
