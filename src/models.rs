use serde::{Deserialize, Deserializer, Serialize};

use crate::preferences::StoryPreferences;

/// Longest prompt the form accepts, in characters.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Message returned to callers for every relay-side failure.
pub const GENERIC_FAILURE: &str = "Failed to generate story";

/// Body of `POST /api/generate`.
///
/// Every field is optional on the wire; absent and `null` fields are the
/// same as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prompt: String,
    #[serde(flatten)]
    pub preferences: StoryPreferences,
}

impl GenerationRequest {
    pub const fn new(prompt: String, preferences: StoryPreferences) -> Self {
        Self {
            prompt,
            preferences,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either envelope the relay can answer with, as seen by the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayReply {
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub relay_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
}

const fn default_timeout() -> u64 {
    600
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:3000".to_string(),
            request_timeout: default_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::Choice;

    #[test]
    fn test_request_wire_shape_is_flat() {
        let mut preferences = StoryPreferences::default();
        preferences.mood = Choice::from("Dark");
        let request = GenerationRequest::new("castle".to_string(), preferences);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "castle");
        assert_eq!(json["mood"], "Dark");
        assert_eq!(json["genre"], "");
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_request_missing_fields_default_to_empty() {
        let request: GenerationRequest = serde_json::from_str(r#"{"genre":"Horror"}"#).unwrap();
        assert_eq!(request.prompt, "");
        assert_eq!(request.preferences.genre.as_str(), "Horror");
        assert!(!request.preferences.mood.is_set());
    }

    #[test]
    fn test_request_null_prompt_is_empty() {
        let request: GenerationRequest = serde_json::from_str(r#"{"prompt":null}"#).unwrap();
        assert_eq!(request.prompt, "");
    }

    #[test]
    fn test_request_rejects_non_string_fields() {
        let result = serde_json::from_str::<GenerationRequest>(r#"{"mood":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_relay_reply_reads_either_envelope() {
        let ok: RelayReply = serde_json::from_str(r#"{"story":"Once"}"#).unwrap();
        assert_eq!(ok.story.as_deref(), Some("Once"));
        assert!(ok.error.is_none());

        let err: RelayReply = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(err.story.is_none());
        assert_eq!(err.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.relay_url, "http://127.0.0.1:3000");
        assert_eq!(config.request_timeout, 600);
    }
}
