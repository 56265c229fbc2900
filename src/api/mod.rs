pub mod routes;
mod server;
pub use server::{SharedState, app, serve, serve_on};
pub mod public;
mod state;
pub use state::AppState;
