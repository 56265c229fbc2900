use std::sync::Arc;
use std::time::Instant;

use handlebars::Handlebars;
use tokio::sync::Mutex;

use crate::core::AppConfig;
use crate::llm::SharedProvider;
use crate::pages;
use crate::session::Session;

pub struct AppState {
    pub session: Session,
    pub provider: SharedProvider,
    pub config: AppConfig,
    pub templates: Handlebars<'static>,
    pub started_at: Instant,
    // Held for the whole of a query so overlapping submissions run one
    // at a time instead of interleaving writes to the session
    pub query_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(provider: SharedProvider, config: AppConfig) -> Self {
        Self {
            session: Session::new(),
            provider,
            config,
            templates: pages::templates(),
            started_at: Instant::now(),
            query_lock: Arc::new(Mutex::new(())),
        }
    }
}
