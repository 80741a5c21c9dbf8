use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    // Any origin: the API is consumed by a separately hosted frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/seed", post(handlers::seed))
        .route("/hotels", get(handlers::list_hotels))
        .route("/hotels/{hotel_id}", get(handlers::get_hotel))
        .route("/availability/{hotel_id}", post(handlers::check_availability))
        .route("/book", post(handlers::book))
        .route("/bookings", get(handlers::list_bookings))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
