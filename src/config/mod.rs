//! Configuration: TOML file, environment overrides and validation.

mod loader;
mod types;

pub use loader::{ConfigError, API_URL_ENV, ENVIRONMENT_ENV};
pub use types::{ApiConfig, Config, Environment, UiConfig};
