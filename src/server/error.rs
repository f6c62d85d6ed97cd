use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::models::{ErrorResponse, GENERIC_FAILURE};

/// Relay-side failures. Callers only ever see [`GENERIC_FAILURE`].
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),
    #[error("provider call failed: {0:#}")]
    Provider(anyhow::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!(error = %self, "story generation failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: GENERIC_FAILURE.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_provider_details_stay_server_side() {
        let response =
            RelayError::Provider(anyhow::anyhow!("API key invalid: AIza-secret")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], GENERIC_FAILURE);
        assert!(!String::from_utf8_lossy(&bytes).contains("AIza"));
    }
}
