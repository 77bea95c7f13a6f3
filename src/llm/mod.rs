//! Chat-completion access and reply helpers.

pub mod json;
pub mod openai;

use async_trait::async_trait;

use crate::error::LlmError;

pub use json::find_json_object;
pub use openai::OpenAiClient;

/// A single request/response exchange with a language model.
///
/// This abstraction allows mocking the remote endpoint in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the instruction and the user content, return the reply text.
    async fn complete(&self, instruction: &str, content: &str) -> Result<String, LlmError>;
}
