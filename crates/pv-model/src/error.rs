//! Error types for model inputs.

use thiserror::Error;

/// Errors raised when a parameter snapshot is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter {what}: {reason}")]
    InvalidParameter { what: &'static str, reason: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<pv_core::PvError> for ModelError {
    fn from(e: pv_core::PvError) -> Self {
        let what = match &e {
            pv_core::PvError::NonFinite { what, .. }
            | pv_core::PvError::OutOfRange { what, .. } => *what,
        };
        ModelError::InvalidParameter {
            what,
            reason: e.to_string(),
        }
    }
}
