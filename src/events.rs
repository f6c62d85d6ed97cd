// Event types for async communication

use crate::api::RelayClient;
use crate::models::GenerationRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The relay returned a story
    StoryReady(String),
    /// Generation failed; carries the message to show the user
    GenerationFailed(String),
}

impl AppEvent {
    /// Send one request to the relay and turn the outcome into an event.
    pub async fn generate(client: &RelayClient, request: &GenerationRequest) -> Self {
        match client.generate(request).await {
            Ok(story) => Self::StoryReady(story),
            Err(e) => {
                tracing::warn!(error = ?e, "relay request failed");
                Self::GenerationFailed(e.to_string())
            }
        }
    }
}
