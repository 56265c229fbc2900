//! Public API types

use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;

use crate::api::routes::pages::public::ErrorView;
use crate::pages::{Page, render, templates};

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into the generic error page.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{:#}", self.0);

        // Only debug builds show the underlying cause to the browser
        let detail = cfg!(debug_assertions).then(|| format!("{:#}", self.0));
        let view = ErrorView {
            title: "500 - Server Error".to_string(),
            message: "An unexpected error occurred.".to_string(),
            suggestion: None,
            error: detail,
        };

        match render(&templates(), Page::Error, &view) {
            Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong: {}", e),
            )
                .into_response(),
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod health {
    pub use crate::api::routes::health::public::*;
}

pub mod pages {
    pub use crate::api::routes::pages::public::*;
}
