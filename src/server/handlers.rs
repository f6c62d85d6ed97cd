use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{AppState, RelayError};
use crate::models::{GenerationRequest, StoryResponse};
use crate::prompt::build_story_prompt;

/// POST /api/generate
#[instrument(name = "generate", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn generate_story(State(state): State<AppState>, body: Bytes) -> Response {
    // Converted inside the span so failure logs carry the request id
    relay_story(&state, &body).await.into_response()
}

async fn relay_story(state: &AppState, body: &[u8]) -> Result<Json<StoryResponse>, RelayError> {
    let request: GenerationRequest = serde_json::from_slice(body)?;
    let instruction = build_story_prompt(&request);
    debug!(chars = instruction.chars().count(), "forwarding instruction");

    let story = state
        .provider
        .generate(&instruction)
        .await
        .map_err(RelayError::Provider)?;

    if story.is_empty() {
        return Err(RelayError::Provider(anyhow::anyhow!(
            "provider returned an empty story"
        )));
    }

    info!(chars = story.chars().count(), "story generated");
    Ok(Json(StoryResponse { story }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "storygen-relay".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
