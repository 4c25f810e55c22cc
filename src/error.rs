use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response was not valid JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Response body was JSON null")]
    NullResponse,

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid server_url {url:?}: {source}")]
    ServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
