use async_trait::async_trait;

use crate::error::Result;

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Send one prompt and return the model's text reply. No retries.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
