//! Error types for the pv-app service layer.

use std::path::PathBuf;

/// Application error type shared by the CLI and GUI frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write scenario file: {path}")]
    ScenarioFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario format error: {0}")]
    Format(String),

    #[error("Unsupported scenario version {found} (latest is {latest})")]
    UnsupportedVersion { found: u32, latest: u32 },

    #[error("Invalid parameters: {0}")]
    Validation(#[from] pv_model::ModelError),

    #[error("Invalid sweep: {0}")]
    Sweep(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Format(format!("YAML: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Format(format!("JSON: {err}"))
    }
}
