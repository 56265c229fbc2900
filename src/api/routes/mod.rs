//! API routes module

pub mod health;
pub mod pages;

use axum::Router;

use crate::api::SharedState;

/// Create the combined JSON API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Health routes
        .merge(health::router())
}
