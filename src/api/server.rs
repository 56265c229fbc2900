use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::{Router, extract::Request, response::Response};
use http::{HeaderValue, header};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::llm::{self, OllamaClient};

pub type SharedState = Arc<RwLock<AppState>>;

async fn set_security_headers(request: Request, next: middleware::Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    response
}

pub fn app(shared_state: SharedState) -> Router {
    let (public_path, max_upload_bytes) = {
        let shared = shared_state.read().expect("Unable to read shared state");
        (
            shared.config.public_path.clone(),
            shared.config.max_upload_bytes,
        )
    };

    Router::new()
        // Pages and form endpoints
        .merge(routes::pages::router())
        // JSON API routes
        .nest("/api", routes::router())
        // Stylesheet and the mirrored output file
        .nest_service("/static", ServeDir::new(public_path))
        .fallback(routes::pages::not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(set_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&shared_state))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let provider = Arc::new(OllamaClient::new(&config.ollama_url));
    let app_state = AppState::new(provider, config);
    let shared_state = Arc::new(RwLock::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    serve_on(listener, shared_state).await
}

/// Accept connections on `listener` while the model list loads in the
/// background. A slow model server delays discovery, not the pages.
pub async fn serve_on(listener: TcpListener, shared_state: SharedState) -> Result<()> {
    tracing::info!("Server started. Listening on http://{}", listener.local_addr()?);

    let discovery_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        llm::load_available_models(&discovery_state).await;
    });

    axum::serve(listener, app(shared_state)).await?;
    Ok(())
}
