//! Axum router configuration with middleware.
//!
//! The route table is built once at startup. API routes live under
//! `/api/`; `/health` is served at the root and needs no credentials.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Token issuance (the one unauthenticated route)
        .route("/token", post(handlers::auth::login))
        // Profile
        .route(
            "/me",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route("/me/regenerate-key", post(handlers::auth::regenerate_key))
        // Todo CRUD
        .route(
            "/todos",
            get(handlers::todo::list_todos).post(handlers::todo::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::todo::get_todo)
                .put(handlers::todo::update_todo)
                .delete(handlers::todo::delete_todo),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
