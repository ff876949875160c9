use crate::budget::BudgetStatus;
use crate::cart_actor::{CartError, CartRequest, Reply};
use crate::ledger::CartEvent;
use crate::model::{HistoryEntry, Item, OptimizationReport};
use crate::orchestrator::OrchestratorState;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
///
/// Every call is a request/reply round trip. `optimize` resolves only after the
/// outcome has been committed to history (or rejected).
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    events: broadcast::Sender<CartEvent>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, events: broadcast::Sender<CartEvent>) -> Self {
        Self { sender, events }
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, name: &str, price: f64, value: f64) -> Result<Item, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::AddItem {
            name: name.to_string(),
            price,
            value,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, index: usize) -> Result<Item, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::RemoveItem { index, respond_to })
            .await
    }

    /// Current cart contents in insertion order.
    pub async fn items(&self) -> Result<Vec<Item>, CartError> {
        self.request(|respond_to| CartRequest::Items { respond_to })
            .await
    }

    pub async fn budget_status(&self, budget: f64) -> Result<BudgetStatus, CartError> {
        self.request(|respond_to| CartRequest::BudgetStatus { budget, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn optimize(&self, budget: f64) -> Result<OptimizationReport, CartError> {
        info!("Sending optimize to actor");
        self.request(|respond_to| CartRequest::Optimize { budget, respond_to })
            .await
    }

    /// Completed optimizations, oldest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, CartError> {
        self.request(|respond_to| CartRequest::History { respond_to })
            .await
    }

    pub async fn orchestrator_state(&self) -> Result<OrchestratorState, CartError> {
        self.request(|respond_to| CartRequest::State { respond_to })
            .await
    }

    /// Change feed of the ledger. Only mutations after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> CartRequest,
    ) -> Result<T, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".into()))?;
        response
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor dropped".into()))?
    }
}
