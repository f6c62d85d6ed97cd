// Client for the story relay's `POST /api/generate`

use anyhow::Context;
use reqwest::Client;
use std::time::Duration;

use crate::models::{GenerationRequest, RelayReply};

#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("Could not reach the story relay")]
    Network(#[source] reqwest::Error),
    #[error("Failed to generate story")]
    Status(reqwest::StatusCode),
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to generate story")]
    Malformed(#[source] reqwest::Error),
    #[error("Failed to generate story")]
    MissingStory,
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(base_url: String, request_timeout: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    /// Issue exactly one generation request and unwrap the reply envelope.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, RelayClientError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(RelayClientError::Network)?;

        if !response.status().is_success() {
            return Err(RelayClientError::Status(response.status()));
        }

        let reply = response
            .json::<RelayReply>()
            .await
            .map_err(RelayClientError::Malformed)?;

        if let Some(error) = reply.error.filter(|e| !e.is_empty()) {
            return Err(RelayClientError::Rejected(error));
        }

        reply
            .story
            .filter(|story| !story.is_empty())
            .ok_or(RelayClientError::MissingStory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GENERIC_FAILURE;

    #[test]
    fn test_client_creation() {
        let client = RelayClient::new("http://127.0.0.1:3000".to_string(), 30);
        assert!(client.is_ok());
    }

    #[test]
    fn test_error_messages_are_generic() {
        let status = RelayClientError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status.to_string(), GENERIC_FAILURE);

        assert_eq!(RelayClientError::MissingStory.to_string(), GENERIC_FAILURE);

        let rejected = RelayClientError::Rejected("Try again later".to_string());
        assert_eq!(rejected.to_string(), "Try again later");
    }
}
