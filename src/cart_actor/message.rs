//! Requests understood by the Cart actor.

use super::CartError;
use crate::budget::BudgetStatus;
use crate::model::{HistoryEntry, Item, OptimizationReport};
use crate::orchestrator::OrchestratorState;
use tokio::sync::oneshot;

pub type Reply<T> = oneshot::Sender<Result<T, CartError>>;

#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        name: String,
        price: f64,
        value: f64,
        respond_to: Reply<Item>,
    },
    RemoveItem {
        index: usize,
        respond_to: Reply<Item>,
    },
    Items {
        respond_to: Reply<Vec<Item>>,
    },
    BudgetStatus {
        budget: f64,
        respond_to: Reply<BudgetStatus>,
    },
    /// Answered once the request has settled, not when it is sent.
    Optimize {
        budget: f64,
        respond_to: Reply<OptimizationReport>,
    },
    History {
        respond_to: Reply<Vec<HistoryEntry>>,
    },
    State {
        respond_to: Reply<OrchestratorState>,
    },
}
