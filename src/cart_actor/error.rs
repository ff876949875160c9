//! Error types for the Cart actor.

use crate::error::{IndexError, ValidationError};
use crate::optimizer::OptimizeError;
use thiserror::Error;

/// Errors returned by cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Rejected input; nothing changed and no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Removal addressed a missing position.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The optimization service call failed; history is unchanged.
    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
