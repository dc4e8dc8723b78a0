use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{
    access_request, admin_approve, admin_deny, health, index_page, oops_page, AppState,
};
use super::middleware::logging_middleware;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(index_page))
        .route("/oops", get(oops_page))
        // Application form
        .route("/access/request", post(access_request))
        // Admin endpoints
        .route("/admin/approve", post(admin_approve))
        .route("/admin/deny", post(admin_deny))
        // Health check
        .route("/health", get(health))
        // Static assets (stylesheet etc.)
        .nest_service("/static", ServeDir::new("static"))
        // Add middleware
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
