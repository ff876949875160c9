//! Failures at the optimization service boundary.

use thiserror::Error;

/// Shown when the service gives no message of its own.
pub const GENERIC_FAILURE: &str = "Optimization failed";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OptimizeError {
    /// Network failure, timeout, or a 2xx body that does not decode.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("Service error ({status}): {}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Service {
        status: u16,
        message: Option<String>,
    },
}

impl OptimizeError {
    /// Text for the danger notification: the service's own message when it sent
    /// one, otherwise a generic failure.
    pub fn notice(&self) -> &str {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message,
            _ => GENERIC_FAILURE,
        }
    }
}

impl From<reqwest::Error> for OptimizeError {
    fn from(e: reqwest::Error) -> Self {
        OptimizeError::Transport(e.to_string())
    }
}
