//! HTTP API: pantry endpoints and the recipe suggestion proxy.

pub mod app;
pub mod config;

pub use config::ApiConfig;
