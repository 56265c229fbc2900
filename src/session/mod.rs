//! In-memory state shared by every request. Nothing here survives a
//! restart.

mod history;

pub use history::{HISTORY_LIMIT, History, HistoryEntry};

use serde::Serialize;

/// Used when the model server can't be reached at startup or has no
/// models pulled yet.
pub const FALLBACK_MODEL: &str = "llama2";

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OllamaStatus {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

#[derive(Debug, Default)]
pub struct Session {
    pub models: Vec<String>,
    pub current_model: String,
    pub last_response: String,
    pub last_error: String,
    pub processing: bool,
    pub ollama_status: OllamaStatus,
    pub history: History,
}

impl Session {
    pub fn new() -> Self {
        Self {
            models: vec![FALLBACK_MODEL.to_string()],
            current_model: FALLBACK_MODEL.to_string(),
            ..Default::default()
        }
    }

    /// Replace the model list with what the server reported. An empty
    /// list keeps the fallback selected.
    pub fn set_models(&mut self, models: Vec<String>) {
        self.current_model = models
            .first()
            .cloned()
            .unwrap_or_else(|| FALLBACK_MODEL.to_string());
        self.models = models;
        self.ollama_status = OllamaStatus::Connected;
    }

    pub fn set_disconnected(&mut self) {
        self.models = vec![FALLBACK_MODEL.to_string()];
        self.current_model = FALLBACK_MODEL.to_string();
        self.ollama_status = OllamaStatus::Disconnected;
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.last_response.clear();
        self.last_error.clear();
    }
}
