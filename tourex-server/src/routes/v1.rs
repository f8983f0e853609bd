use axum::{Router, routing::patch};

use crate::{AppState, tours::tour_handlers};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/tours/{id}", patch(tour_handlers::update_tour_handler))
}
