use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::SharedState;
use crate::session::HistoryEntry;

async fn write_output(output_path: &str, response: &str) -> Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(output_path, response)
        .await
        .with_context(|| format!("Failed to write {}", output_path))?;
    Ok(())
}

/// Send `prompt` to `model` and record the outcome on the session.
///
/// On success the reply becomes the current response, is added to
/// the history and overwrites the output file. Any failure ends up in
/// the session's error message; nothing is returned to the caller.
/// The state lock is only held between awaits.
pub async fn invoke(state: &SharedState, model: &str, prompt: &str) {
    let (provider, output_path) = {
        let mut shared = state.write().expect("Unable to write shared state");
        shared.session.processing = true;
        shared.session.last_error.clear();
        shared.session.last_response.clear();
        (Arc::clone(&shared.provider), shared.config.output_path.clone())
    };

    match provider.chat(model, prompt).await {
        Ok(response) => {
            {
                let mut shared = state.write().expect("Unable to write shared state");
                shared.session.last_response = response.clone();
                shared
                    .session
                    .history
                    .push(HistoryEntry::new(model, prompt, &response));
            }

            if let Err(e) = write_output(&output_path, &response).await {
                tracing::error!("{:#}", e);
                state
                    .write()
                    .expect("Unable to write shared state")
                    .session
                    .last_error = format!("Error: {:#}", e);
            }
        }
        Err(e) => {
            tracing::error!("LLM error from {}: {:#}", provider.name(), e);
            state
                .write()
                .expect("Unable to write shared state")
                .session
                .last_error = format!("Error: {:#}", e);
        }
    }

    state
        .write()
        .expect("Unable to write shared state")
        .session
        .processing = false;
}

/// Ask the provider which models are installed. Falls back to a
/// default model when the server can't be reached.
pub async fn load_available_models(state: &SharedState) {
    let provider = Arc::clone(&state.read().expect("Unable to read shared state").provider);

    match provider.list_models().await {
        Ok(models) => {
            tracing::info!("Models loaded: {:?}", models);
            state
                .write()
                .expect("Unable to write shared state")
                .session
                .set_models(models);
        }
        Err(e) => {
            tracing::warn!("{} unavailable, using fallback model: {:#}", provider.name(), e);
            state
                .write()
                .expect("Unable to write shared state")
                .session
                .set_disconnected();
        }
    }
}
