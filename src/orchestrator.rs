//! Optimization Orchestrator: the single-flight request/response state machine.
//!
//! ```text
//! Idle --begin--> Requesting --settle(ok)--> Committed --> Idle
//!                            \--settle(err)-> Rejected  --> Idle
//! ```
//!
//! [`Orchestrator::begin`] checks the local preconditions and hands out a [`Ticket`]
//! holding the cart snapshot. Only one ticket can exist at a time, and
//! [`Orchestrator::settle`] consumes it. The network call itself happens elsewhere
//! (see [`crate::cart_actor`]); this type never touches the ledger after taking
//! the snapshot.

use crate::clients::Notifier;
use crate::error::{is_positive, ValidationError};
use crate::history::HistoryStore;
use crate::ledger::ItemLedger;
use crate::model::{HistoryEntry, OptimizationReport, OptimizationRequest, OptimizationResult, Severity};
use crate::optimizer::OptimizeError;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

const SUCCESS_NOTICE: &str = "Optimization Complete!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    Requesting,
    Committed,
    Rejected,
}

impl OrchestratorState {
    pub fn can_transition(self, to: OrchestratorState) -> bool {
        use OrchestratorState::*;
        matches!(
            (self, to),
            (Idle, Requesting)
                | (Requesting, Committed)
                | (Requesting, Rejected)
                | (Committed, Idle)
                | (Rejected, Idle)
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Illegal orchestrator transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: OrchestratorState,
    pub to: OrchestratorState,
}

/// Proof that a request is in flight, carrying the immutable snapshot it was built from.
#[derive(Debug)]
pub struct Ticket {
    request: OptimizationRequest,
}

impl Ticket {
    pub fn request(&self) -> &OptimizationRequest {
        &self.request
    }

    pub fn budget(&self) -> f64 {
        self.request.budget
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    state: OrchestratorState,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            state: OrchestratorState::Idle,
        }
    }

    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    pub fn transition(&mut self, to: OrchestratorState) -> Result<(), TransitionError> {
        if !self.state.can_transition(to) {
            return Err(TransitionError {
                from: self.state,
                to,
            });
        }
        info!(from = ?self.state, ?to, "Orchestrator transition");
        self.state = to;
        Ok(())
    }

    /// Checks, in order: budget, non-empty cart, no request in flight. On success the
    /// machine is `Requesting` and the ticket holds a snapshot of the cart.
    pub fn begin(&mut self, budget: f64, ledger: &ItemLedger) -> Result<Ticket, ValidationError> {
        if !is_positive(budget) {
            return Err(ValidationError::InvalidBudget(budget));
        }
        if ledger.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        self.transition(OrchestratorState::Requesting)
            .map_err(|_| ValidationError::RequestInFlight)?;
        Ok(Ticket {
            request: OptimizationRequest {
                budget,
                items: ledger.snapshot(),
            },
        })
    }

    /// Commits or rejects the outcome of `ticket`'s request and returns to `Idle`.
    ///
    /// Success appends one history entry (ticket budget + the service's selection) and
    /// emits a success notice. Failure emits a danger notice and leaves history alone.
    pub async fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<OptimizationResult, OptimizeError>,
        history: &HistoryStore,
        notifier: &dyn Notifier,
    ) -> Result<OptimizationReport, OptimizeError> {
        match outcome {
            Ok(result) => {
                history.append(HistoryEntry::record(ticket.budget(), &result, Utc::now()));
                notifier.notify(SUCCESS_NOTICE, Severity::Success).await;
                self.finish(OrchestratorState::Committed);
                let report = OptimizationReport::new(result);
                info!(
                    session = %report.session_label,
                    selected = report.result.selected_items.len(),
                    total_price = report.result.total_price,
                    total_value = report.result.total_value,
                    "Optimization committed"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "Optimization rejected");
                notifier.notify(e.notice(), Severity::Danger).await;
                self.finish(OrchestratorState::Rejected);
                Err(e)
            }
        }
    }

    fn finish(&mut self, outcome: OrchestratorState) {
        for next in [outcome, OrchestratorState::Idle] {
            if let Err(e) = self.transition(next) {
                // Unreachable while tickets only come from `begin`.
                error!(error = %e, "Orchestrator out of sync");
                self.state = OrchestratorState::Idle;
                return;
            }
        }
    }
}
