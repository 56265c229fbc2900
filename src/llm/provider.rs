use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// A backend capable of listing its models and answering a single
/// prompt. Ollama is the only production implementation; tests swap
/// in their own.
#[async_trait]
pub trait CompletionProvider {
    /// Name shown on the status page
    fn name(&self) -> &str;

    async fn list_models(&self) -> Result<Vec<String>>;

    /// Send `prompt` as a single user message and wait for the whole
    /// reply.
    async fn chat(&self, model: &str, prompt: &str) -> Result<String>;
}

pub type SharedProvider = Arc<dyn CompletionProvider + Send + Sync + 'static>;
