//! Router for the server-rendered pages

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Multipart, State, multipart::MultipartError},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use uuid::Uuid;

use super::public::{
    ErrorView, IndexView, MAX_PROMPT_CHARS, QueryForm, StatusView, SystemInfo, TaskOption,
    UploadedFile,
};
use crate::api::SharedState;
use crate::api::public::ApiError;
use crate::llm;
use crate::pages::{self, Page};
use crate::prompt::{Task, compose_prompt};

const OUTPUT_FILE_NAME: &str = "output.txt";

/// Render the query form with the current session
async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let shared = state.read().expect("Unable to read shared state");
    let session = &shared.session;
    let view = IndexView {
        models: &session.models,
        current_model: &session.current_model,
        tasks: Task::ALL.into_iter().map(TaskOption::from).collect(),
        max_prompt_chars: MAX_PROMPT_CHARS,
        response: &session.last_response,
        processing: session.processing,
        error: &session.last_error,
        history: &session.history,
    };

    Ok(Html(pages::render(&shared.templates, Page::Index, &view)?))
}

async fn read_query_form(mut multipart: Multipart) -> Result<QueryForm, MultipartError> {
    let mut form = QueryForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "prompt" => form.prompt = Some(field.text().await?),
            "model" => form.model = Some(field.text().await?),
            "task" => form.task = Some(field.text().await?),
            "inputFile" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    form.file = Some(UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!("Ignoring unexpected form field {}", other),
        }
    }

    Ok(form)
}

/// Keep the upload on disk and return its contents as text
async fn store_upload(uploads_path: &str, file: &UploadedFile) -> Result<String> {
    tokio::fs::create_dir_all(uploads_path)
        .await
        .with_context(|| format!("Failed to create {}", uploads_path))?;

    let path = Path::new(uploads_path).join(Uuid::new_v4().to_string());
    tokio::fs::write(&path, &file.bytes)
        .await
        .with_context(|| format!("Failed to save upload {}", file.file_name))?;
    tracing::debug!("Saved upload {} to {}", file.file_name, path.display());

    Ok(String::from_utf8_lossy(&file.bytes).into_owned())
}

/// Validate the form, send the composed prompt to the model and
/// redirect back to the form
async fn query(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let query_lock = Arc::clone(&state.read().expect("Unable to read shared state").query_lock);
    let _guard = query_lock.lock().await;

    let form = match read_query_form(multipart).await {
        Ok(form) => form,
        // The body limit trips while the upload is being streamed in
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!("Rejected query form: {}", e);
            let mut shared = state.write().expect("Unable to write shared state");
            shared.session.last_error = format!(
                "File too large (max {} MB).",
                shared.config.max_upload_bytes / (1024 * 1024)
            );
            return Ok(Redirect::to("/"));
        }
        Err(e) => return Err(e.into()),
    };
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(message) => {
            state
                .write()
                .expect("Unable to write shared state")
                .session
                .last_error = message.to_string();
            return Ok(Redirect::to("/"));
        }
    };

    let file_content = match &form.file {
        Some(file) => {
            let uploads_path = state
                .read()
                .expect("Unable to read shared state")
                .config
                .uploads_path
                .clone();
            store_upload(&uploads_path, file).await?
        }
        None => String::new(),
    };

    state
        .write()
        .expect("Unable to write shared state")
        .session
        .current_model = valid.model.to_string();

    let prompt = compose_prompt(valid.task, valid.prompt, &file_content);
    llm::invoke(&state, valid.model, &prompt).await;

    Ok(Redirect::to("/"))
}

/// Send the last model response as a file
async fn download_output(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let output_path = state
        .read()
        .expect("Unable to read shared state")
        .config
        .output_path
        .clone();

    match tokio::fs::read(&output_path).await {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Ok((StatusCode::NOT_FOUND, "No output file available.").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn clear_history(State(state): State<SharedState>) -> Redirect {
    state
        .write()
        .expect("Unable to write shared state")
        .session
        .clear();
    Redirect::to("/")
}

fn process_memory() -> Option<u64> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = sysinfo::System::new();
    system.refresh_process(pid);
    system.process(pid).map(|process| process.memory())
}

/// Diagnostics for the session and the running process
async fn status(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    // sysinfo reads /proc synchronously
    let memory = tokio::task::spawn_blocking(process_memory).await?;

    let shared = state.read().expect("Unable to read shared state");
    let session = &shared.session;
    let view = StatusView {
        provider: shared.provider.name(),
        ollama_status: session.ollama_status,
        models: &session.models,
        current_model: &session.current_model,
        history_count: session.history.len(),
        processing: session.processing,
        system: SystemInfo {
            version: env!("CARGO_PKG_VERSION"),
            platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            uptime: shared.started_at.elapsed().as_secs(),
            memory,
        },
    };

    Ok(Html(pages::render(&shared.templates, Page::Status, &view)?))
}

/// Rendered for any route that doesn't exist
pub async fn not_found(State(state): State<SharedState>, uri: Uri) -> Response {
    let view = ErrorView {
        title: "404 - Page Not Found".to_string(),
        message: format!("The requested page \"{}\" does not exist.", uri),
        suggestion: Some("Check the URL or return to the homepage.".to_string()),
        error: None,
    };
    let rendered = {
        let shared = state.read().expect("Unable to read shared state");
        pages::render(&shared.templates, Page::Error, &view)
    };

    match rendered {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create the pages router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/query", post(query))
        .route("/download-output", get(download_output))
        .route("/clear-history", post(clear_history))
        .route("/status", get(status))
}
