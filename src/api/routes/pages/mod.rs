//! Server-rendered pages and the form endpoints behind them

pub mod public;
mod router;
pub use router::{not_found, router};
