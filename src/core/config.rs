use std::env;

use crate::llm::DEFAULT_OLLAMA_URL;

const DEFAULT_MAX_UPLOAD_MB: usize = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub public_path: String,
    pub output_path: String,
    pub uploads_path: String,
    pub ollama_url: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Derive every on-disk location from a single storage root.
    pub fn with_storage_path(storage_path: &str, ollama_url: &str) -> Self {
        let storage_path = storage_path.trim_end_matches('/').to_string();
        let public_path = format!("{}/public", storage_path);
        let output_path = format!("{}/output.txt", public_path);
        let uploads_path = format!("{}/uploads", storage_path);

        Self {
            public_path,
            output_path,
            uploads_path,
            ollama_url: ollama_url.trim_end_matches('/').to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("PROMPTDESK_STORAGE_PATH").unwrap_or(".".to_string());
        let ollama_url =
            env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        // Ollama itself accepts a bare host:port in OLLAMA_HOST
        let ollama_url = if ollama_url.starts_with("http://") || ollama_url.starts_with("https://")
        {
            ollama_url
        } else {
            format!("http://{}", ollama_url)
        };
        let max_upload_mb = env::var("PROMPTDESK_MAX_UPLOAD_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        Self {
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            ..Self::with_storage_path(&storage_path, &ollama_url)
        }
    }
}
