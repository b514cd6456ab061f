use crate::api::entries::entries::{
    entry_analytics, entry_stats, get_entry, list_entries, save_entry,
};
use crate::api::users::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::health;
use crate::state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Entry endpoints
        .route("/api/v1/entries", post(save_entry).get(list_entries))
        .route("/api/v1/entries/stats", get(entry_stats))
        .route("/api/v1/entries/analytics", get(entry_analytics))
        .route("/api/v1/entries/{id}", get(get_entry))
        // Admin user management
        .route("/api/v1/admin/users", get(list_users).post(create_user))
        .route(
            "/api/v1/admin/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
