//! Story relay HTTP service
//!
//! `POST /api/generate` turns a [`GenerationRequest`](crate::models::GenerationRequest)
//! into one provider instruction and answers with `{ story }` or a generic
//! `{ error }`. Requests share nothing but the provider handle.

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::api::StoryProvider;

mod error;
mod handlers;

pub use error::RelayError;
pub use handlers::{generate_story, health_check, HealthResponse};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn StoryProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn StoryProvider>) -> Self {
        Self { provider }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate_story))
        .route("/health", get(health_check))
        .with_state(state)
}
