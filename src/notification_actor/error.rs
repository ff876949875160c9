//! Error types for the Notification actor.

use crate::model::NotificationPhase;
use thiserror::Error;

/// Errors that can occur during notification operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    /// Notifications must carry some text.
    #[error("Notification message must not be empty")]
    EmptyMessage,

    /// The requested phase change is not allowed from the current phase.
    #[error("Invalid notification transition from {0:?}")]
    InvalidTransition(NotificationPhase),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for NotificationError {
    fn from(msg: String) -> Self {
        NotificationError::ActorCommunicationError(msg)
    }
}
