// Text generation providers
//
// The relay only needs "prompt in, text out". Providers implement `complete`;
// `generate` assembles the system prompt and the user's proposal first.

use async_trait::async_trait;

pub mod error;
pub mod gemini;

pub use error::GenerationError;
pub use gemini::GeminiProvider;

use crate::prompt::compose_full_prompt;

/// Trait for text generation backends
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one text prompt and return the model's output verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generate a reply to `user_message` under `system_prompt`.
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, GenerationError> {
        let prompt = compose_full_prompt(system_prompt, user_message);
        self.complete(&prompt).await
    }

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Get the model this provider sends requests to
    fn default_model(&self) -> &str;
}
