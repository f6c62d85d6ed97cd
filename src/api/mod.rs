// HTTP clients: the generative-model provider and the story relay

mod gemini;
mod relay;

pub use gemini::GeminiClient;
pub use relay::{RelayClient, RelayClientError};

use async_trait::async_trait;

/// A generative-text backend the relay forwards instructions to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Send one instruction and return the generated text.
    async fn generate(&self, instruction: &str) -> anyhow::Result<String>;
}
