//! Error types for control plane requests

use thiserror::Error;

/// Errors returned by [`crate::Client`]
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("control plane returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// HTTP status code of the failed request, if the control plane answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
