pub mod health;

use axum::{routing::get, Router};

use crate::oracle::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Readings
        .route("/api/oracle", get(handlers::handle_oracle))
        // Catalog and landing page
        .route("/api/v1/categories", get(handlers::handle_list_categories))
        .route(
            "/api/v1/categories/:slug",
            get(handlers::handle_get_category),
        )
        .route("/api/v1/today", get(handlers::handle_today))
        .with_state(state)
}
