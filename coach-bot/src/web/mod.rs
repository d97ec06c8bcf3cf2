//! Plan web server: serves the links the bot hands out.
//!
//! `GET /health` and `GET /user/{user_id}/plan/{index}`. Reads profiles through
//! [`ProfileStore::get`], so visiting a link never creates a profile.

mod error;
mod routes;

pub use error::{Result, WebError};
pub use routes::{health, plan_page};

use axum::routing::get;
use axum::Router;
use coach_core::ProfileStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Shared state of the web server.
#[derive(Clone)]
pub struct WebState {
    pub store: Arc<dyn ProfileStore>,
}

/// Builds the router with all routes.
pub fn router(store: Arc<dyn ProfileStore>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/user/:user_id/plan/:index", get(routes::plan_page))
        .with_state(WebState { store })
}

/// Binds `0.0.0.0:{port}` and serves until the task is dropped.
pub async fn serve(store: Arc<dyn ProfileStore>, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Plan web server listening");
    axum::serve(listener, router(store)).await?;
    Ok(())
}
