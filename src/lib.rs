pub mod assistant;
pub mod classifier;
pub mod config;
pub mod error;
pub mod files;
pub mod i18n;
pub mod keywords;
pub mod linguistics;
pub mod ollama;
pub mod prompts;
pub mod retry;
pub mod server;
pub mod speech;
pub mod translation;
