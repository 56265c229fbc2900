use anyhow::Result;

use crate::core::AppConfig;
use crate::llm::{CompletionProvider, OllamaClient};

pub async fn run() -> Result<()> {
    let config = AppConfig::default();
    let client = OllamaClient::new(&config.ollama_url);
    let models = client.list_models().await?;

    if models.is_empty() {
        println!("No models installed at {}", client.base_url());
    }
    for model in models {
        println!("{}", model);
    }

    Ok(())
}
