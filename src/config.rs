//! Runtime configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DOWNLOAD_DIR: &str = "./downloads";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RESULTS_API_BASE_URL must be set")]
    MissingBaseUrl,
}

/// Configuration for the results client.
///
/// The API origin is deliberately not a compile-time literal; it comes from
/// `RESULTS_API_BASE_URL`. `RESULTS_DOWNLOAD_DIR` controls where exported
/// PDFs land and defaults to `./downloads`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file
        let api_base_url = env::var("RESULTS_API_BASE_URL")
            .map_err(|_| ConfigError::MissingBaseUrl)?
            .trim_end_matches('/')
            .to_string();
        let download_dir = env::var("RESULTS_DOWNLOAD_DIR")
            .unwrap_or_else(|_| DEFAULT_DOWNLOAD_DIR.to_string())
            .into();

        Ok(Self {
            api_base_url,
            download_dir,
        })
    }
}
