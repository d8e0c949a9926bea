//! HTTP surface over a [`SharedAggregator`].
//!
//! `GET /` returns the index view as JSON; every mutation is a form POST
//! that redirects back to the referring page.

pub mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::aggregator::SharedAggregator;

pub use error::ApiError;

/// Create the application router.
pub fn create_router(aggregator: SharedAggregator) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add", post(handlers::add_feed))
        .route("/remove", post(handlers::remove_feed))
        .route("/refresh", get(handlers::refresh).post(handlers::refresh))
        .route("/toggle-read", post(handlers::toggle_read))
        .route("/toggle-favorite", post(handlers::toggle_favorite))
        .route("/mark-all-read", post(handlers::mark_all_read))
        .layer(TraceLayer::new_for_http())
        .with_state(aggregator)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, aggregator: SharedAggregator) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(aggregator)).await
}
