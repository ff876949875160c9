//! The boundary to the remote optimization service.
//!
//! The selection algorithm runs remotely and is a black box. Everything that
//! crosses this boundary is decoded into typed values here, before any cart or
//! history logic sees it.

pub mod error;
pub mod http;

pub use error::*;
pub use http::*;

use crate::model::{OptimizationRequest, OptimizationResult};
use async_trait::async_trait;

#[async_trait]
pub trait OptimizationService: Send + Sync {
    /// Asks the service for the best affordable subset of `request.items`.
    ///
    /// The result is trusted: it is not re-checked against the budget or the request.
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, OptimizeError>;
}
