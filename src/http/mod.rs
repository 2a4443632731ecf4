//! HTTP API over the record stores.
//!
//! Thin plumbing: handlers validate bodies, call the stores and translate
//! outcomes into status codes. No store logic lives here.

pub mod error;
pub mod handlers;
pub mod validation;

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::feedback::FeedbackStore;
use crate::subscribers::SubscriberStore;

pub use error::ApiError;

/// Shared application state
pub struct AppState {
    pub subscribers: Arc<SubscriberStore>,
    pub feedback: Arc<FeedbackStore>,
}

impl AppState {
    pub fn new(subscribers: SubscriberStore, feedback: FeedbackStore) -> Self {
        Self {
            subscribers: Arc::new(subscribers),
            feedback: Arc::new(feedback),
        }
    }

    /// Open the subscriber log from config and start with no feedback.
    pub fn open(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(SubscriberStore::open(config)?, FeedbackStore::new()))
    }
}

/// Create the API router, optionally serving static assets for other paths
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route(
            "/subscribers",
            get(handlers::list_subscribers).post(handlers::create_subscriber),
        )
        .route("/subscribers/{id}", get(handlers::get_subscriber))
        .route(
            "/feedbacks",
            get(handlers::list_feedback)
                .post(handlers::create_feedback)
                .delete(handlers::clear_feedback),
        )
        .route(
            "/feedbacks/category/{category}",
            get(handlers::list_feedback_by_category),
        )
        .route("/health", get(handlers::get_health));

    let mut router = Router::new().nest("/api", api);

    if let Some(dir) = static_dir {
        let assets = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(assets);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Start the server
pub async fn serve(config: &ServiceConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_router(state, config.static_dir.as_deref());
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("roster listening on {}", addr);
    axum::serve(listener, app).await
}
