pub mod api;
pub mod cli;
pub mod core;
pub mod llm;
pub mod pages;
pub mod prompt;
pub mod session;
