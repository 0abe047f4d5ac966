//! API module
//!
//! Contains HTTP request handlers and the application router

pub mod blogs;

use crate::state::AppState;
use axum::{
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Hello response
#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    /// Greeting
    pub message: String,
    /// Status indicator
    pub status: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable message
    pub message: String,
}

/// Build the application router
///
/// Middleware layers are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check and hello world
        .route("/", get(hello_world))
        .route("/api/health", get(health_check))
        // Blog API
        .nest("/api/blogs", blog_routes())
        .with_state(state)
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/stats",
            get(blogs::blog_stats)
                .put(blogs::reserved_blog_id)
                .delete(blogs::reserved_blog_id),
        )
        .route("/:id", put(blogs::update_blog).delete(blogs::delete_blog))
}

async fn hello_world() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from Blog List Backend!".to_string(),
        status: "ok".to_string(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}
