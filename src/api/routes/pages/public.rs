//! Public types for the pages
use serde::Serialize;

use crate::prompt::Task;
use crate::session::{History, OllamaStatus};

/// Longest prompt accepted, counted in characters
pub const MAX_PROMPT_CHARS: usize = 5000;

pub const MISSING_FIELDS_ERROR: &str =
    "Please enter a prompt, select a model, and choose a task.";

pub const PROMPT_TOO_LONG_ERROR: &str = "Prompt too long (max 5000 characters).";

/// A file attached to the query form
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields submitted to `/query`. Everything is optional until
/// validated.
#[derive(Debug, Default)]
pub struct QueryForm {
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub task: Option<String>,
    pub file: Option<UploadedFile>,
}

#[derive(Debug, PartialEq)]
pub struct ValidQuery<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub task: &'a str,
}

impl QueryForm {
    /// Check the form before anything is sent to the model. The error
    /// is the message shown to the user.
    pub fn validate(&self) -> Result<ValidQuery<'_>, &'static str> {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|s| !s.is_empty())
        }

        let (Some(prompt), Some(model), Some(task)) = (
            non_empty(&self.prompt),
            non_empty(&self.model),
            non_empty(&self.task),
        ) else {
            return Err(MISSING_FIELDS_ERROR);
        };

        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(PROMPT_TOO_LONG_ERROR);
        }

        Ok(ValidQuery {
            prompt,
            model,
            task,
        })
    }
}

#[derive(Serialize)]
pub struct TaskOption {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<Task> for TaskOption {
    fn from(task: Task) -> Self {
        Self {
            key: task.key(),
            label: task.label(),
        }
    }
}

#[derive(Serialize)]
pub struct IndexView<'a> {
    pub models: &'a [String],
    pub current_model: &'a str,
    pub tasks: Vec<TaskOption>,
    pub max_prompt_chars: usize,
    pub response: &'a str,
    pub processing: bool,
    pub error: &'a str,
    pub history: &'a History,
}

#[derive(Serialize)]
pub struct SystemInfo {
    pub version: &'static str,
    pub platform: String,
    pub uptime: u64,
    pub memory: Option<u64>,
}

#[derive(Serialize)]
pub struct StatusView<'a> {
    pub provider: &'a str,
    pub ollama_status: OllamaStatus,
    pub models: &'a [String],
    pub current_model: &'a str,
    pub history_count: usize,
    pub processing: bool,
    pub system: SystemInfo,
}

#[derive(Serialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
    pub suggestion: Option<String>,
    pub error: Option<String>,
}
