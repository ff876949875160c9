//! HTTP client for the remote optimization service.

use super::{OptimizationService, OptimizeError};
use crate::model::{OptimizationRequest, OptimizationResult};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Body of a non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to `POST {base_url}/optimize`.
#[derive(Debug, Clone)]
pub struct HttpOptimizer {
    client: Client,
    endpoint: Url,
}

impl HttpOptimizer {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    /// Fails when `base_url` is not a valid URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, OptimizeError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| OptimizeError::Transport(format!("invalid service url {base_url}: {e}")))?;
        // Keep any path prefix: "http://host/api" must resolve to "/api/optimize".
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("optimize")
            .map_err(|e| OptimizeError::Transport(e.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OptimizationService for HttpOptimizer {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, items = request.items.len()))]
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, OptimizeError> {
        debug!(?request, "Sending optimization request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still counts as a service error, just without text.
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.trim().is_empty());
            warn!(status = status.as_u16(), ?message, "Optimization service rejected request");
            return Err(OptimizeError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let result: OptimizationResult = response.json().await?;
        info!(
            selected = result.selected_items.len(),
            total_price = result.total_price,
            total_value = result.total_value,
            "Optimization response received"
        );
        Ok(result)
    }
}
