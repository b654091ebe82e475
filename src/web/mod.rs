//! Web layer - HTTP routes, middleware and page rendering.
//!
//! Handlers return a [`TemplateResponse`] naming the page to render. The
//! rubric middleware adds the rubric navigation to that context and renders
//! the page, so handlers never deal with the shared layout.

/// Mapping of crate errors to HTTP responses
pub mod error;
/// Route handlers
pub mod handlers;
/// Response hook rendering pages
pub mod middleware;
/// Page templates and the response type carrying them
pub mod template;

pub use template::{Page, TemplateResponse};

use crate::templatetags::TagLibrary;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared data available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
    /// Template tags used by the renderer
    pub tags: Arc<TagLibrary>,
}

impl AppState {
    /// Creates the state from a connection and a tag library.
    #[must_use]
    pub fn new(db: DatabaseConnection, tags: TagLibrary) -> Self {
        Self {
            db: Arc::new(db),
            tags: Arc::new(tags),
        }
    }
}

/// Builds the complete application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add/", get(handlers::add_form).post(handlers::add_submit))
        .route("/:rubric_id/", get(handlers::by_rubric))
        .route("/machines/:machine_id/", get(handlers::machine_detail))
        .route(
            "/machines/:machine_id/schedule/",
            post(handlers::regenerate_schedule),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::rubric_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
