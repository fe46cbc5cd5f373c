use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{airports, cities, flights};
use crate::middleware::auth::require_admin;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public read-only routes
    let public_routes = Router::new()
        .route("/cities", get(cities::list_cities))
        .route("/cities/{id}", get(cities::get_city))
        .route("/airports", get(airports::list_airports))
        .route("/airports/{id}", get(airports::get_airport))
        .route("/flights", get(flights::list_flights))
        .route("/flights/search", get(flights::search_flights))
        .route("/flights/{id}", get(flights::get_flight));

    // Mutating routes (requires the shared admin token)
    let admin_routes = Router::new()
        // City management
        .route("/cities", post(cities::create_city))
        .route("/cities", delete(cities::delete_all_cities))
        .route("/cities/{id}", delete(cities::delete_city))
        // Airport management
        .route("/airports", post(airports::create_airport))
        .route("/airports", put(airports::update_all_airports))
        .route("/airports", delete(airports::delete_all_airports))
        .route("/airports/{id}", put(airports::update_airport))
        .route("/airports/{id}", delete(airports::delete_airport))
        // Flight management
        .route("/flights", post(flights::create_flight))
        .route("/flights", delete(flights::delete_all_flights))
        .route("/flights/{id}", put(flights::update_flight))
        .route("/flights/{id}", delete(flights::delete_flight))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Combine all routes
    Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
