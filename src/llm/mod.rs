//! Model gateway: the completion provider capability, the Ollama
//! backend and the `invoke` operation that records results on the
//! session.

mod gateway;
mod ollama;
mod provider;

pub use gateway::{invoke, load_available_models};
pub use ollama::{DEFAULT_OLLAMA_URL, Message, OllamaClient, Role};
pub use provider::{CompletionProvider, SharedProvider};
