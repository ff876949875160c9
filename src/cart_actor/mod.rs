//! # Cart Actor
//!
//! Sole owner of the cart state: the [`ItemLedger`], the [`Orchestrator`] and the
//! [`HistoryStore`]. Requests are handled one at a time, so ledger edits never race
//! with the orchestrator reading the cart.
//!
//! An optimization call runs in its own task. While it is outstanding the actor keeps
//! serving ledger requests, and the ticket taken at `begin` pins the snapshot that was
//! sent. The caller's reply is held back until the outcome has been settled.

pub mod error;
pub mod message;

pub use error::*;
pub use message::*;

use crate::budget;
use crate::clients::{CartClient, Notifier};
use crate::history::HistoryStore;
use crate::ledger::ItemLedger;
use crate::model::{OptimizationReport, OptimizationResult, Severity};
use crate::optimizer::{OptimizationService, OptimizeError};
use crate::orchestrator::{Orchestrator, Ticket};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

struct InFlight {
    ticket: Ticket,
    respond_to: Reply<OptimizationReport>,
    task: JoinHandle<Result<OptimizationResult, OptimizeError>>,
}

enum Event {
    Request(CartRequest),
    Settled(Result<OptimizationResult, OptimizeError>),
    Closed,
}

pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    ledger: ItemLedger,
    orchestrator: Orchestrator,
    history: HistoryStore,
    service: Arc<dyn OptimizationService>,
    notifier: Arc<dyn Notifier>,
}

/// Creates a new Cart actor and its client.
pub fn new(
    buffer: usize,
    service: Arc<dyn OptimizationService>,
    history: HistoryStore,
    notifier: Arc<dyn Notifier>,
) -> (CartActor, CartClient) {
    let (sender, receiver) = mpsc::channel(buffer);
    let ledger = ItemLedger::new();
    let client = CartClient::new(sender, ledger.event_sender());
    let actor = CartActor {
        receiver,
        ledger,
        orchestrator: Orchestrator::new(),
        history,
        service,
        notifier,
    };
    (actor, client)
}

impl CartActor {
    /// Runs until every client is dropped. An outstanding optimization is settled
    /// before the loop exits.
    pub async fn run(mut self) {
        info!(history_key = self.history.key(), "Cart actor started");
        let mut in_flight: Option<InFlight> = None;

        loop {
            let event = tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => Event::Request(msg),
                    None => Event::Closed,
                },
                outcome = wait_for(&mut in_flight) => Event::Settled(outcome),
            };

            match event {
                Event::Request(msg) => self.handle(msg, &mut in_flight).await,
                Event::Settled(outcome) => {
                    if let Some(pending) = in_flight.take() {
                        self.settle(pending, outcome).await;
                    }
                }
                Event::Closed => {
                    if let Some(mut pending) = in_flight.take() {
                        info!("Waiting for in-flight optimization");
                        let outcome = join_outcome((&mut pending.task).await);
                        self.settle(pending, outcome).await;
                    }
                    break;
                }
            }
        }

        info!(items = self.ledger.len(), "Cart actor shutdown");
    }

    async fn handle(&mut self, msg: CartRequest, in_flight: &mut Option<InFlight>) {
        match msg {
            CartRequest::AddItem {
                name,
                price,
                value,
                respond_to,
            } => {
                debug!(%name, price, value, "AddItem");
                let result = match self.ledger.add(&name, price, value) {
                    Ok(item) => {
                        info!(name = item.name(), len = self.ledger.len(), "Item added");
                        self.notifier
                            .notify(&format!("Added: {}", item.name()), Severity::Success)
                            .await;
                        Ok(item)
                    }
                    Err(e) => {
                        warn!(error = %e, "AddItem rejected");
                        self.notifier.notify(e.notice(), Severity::Warning).await;
                        Err(e.into())
                    }
                };
                let _ = respond_to.send(result);
            }
            CartRequest::RemoveItem { index, respond_to } => {
                debug!(index, "RemoveItem");
                let result = match self.ledger.remove_at(index) {
                    Ok(item) => {
                        info!(name = item.name(), len = self.ledger.len(), "Item removed");
                        self.notifier
                            .notify(&format!("Removed: {}", item.name()), Severity::Danger)
                            .await;
                        Ok(item)
                    }
                    Err(e) => {
                        warn!(error = %e, "RemoveItem rejected");
                        Err(e.into())
                    }
                };
                let _ = respond_to.send(result);
            }
            CartRequest::Items { respond_to } => {
                debug!(len = self.ledger.len(), "Items");
                let _ = respond_to.send(Ok(self.ledger.snapshot()));
            }
            CartRequest::BudgetStatus { budget, respond_to } => {
                let status = budget::classify(self.ledger.total_spend(), budget);
                debug!(budget, ?status, "BudgetStatus");
                let _ = respond_to.send(Ok(status));
            }
            CartRequest::History { respond_to } => {
                let entries = self.history.load_all();
                debug!(len = entries.len(), "History");
                let _ = respond_to.send(Ok(entries));
            }
            CartRequest::State { respond_to } => {
                let _ = respond_to.send(Ok(self.orchestrator.state()));
            }
            CartRequest::Optimize { budget, respond_to } => {
                if let Some(started) = self.start_optimize(budget, respond_to).await {
                    *in_flight = Some(started);
                }
            }
        }
    }

    async fn start_optimize(
        &mut self,
        budget: f64,
        respond_to: Reply<OptimizationReport>,
    ) -> Option<InFlight> {
        debug!(budget, "Optimize");
        let ticket = match self.orchestrator.begin(budget, &self.ledger) {
            Ok(ticket) => ticket,
            Err(e) => {
                warn!(error = %e, "Optimize rejected");
                self.notifier.notify(e.notice(), Severity::Warning).await;
                let _ = respond_to.send(Err(e.into()));
                return None;
            }
        };

        info!(budget, items = ticket.request().items.len(), "Optimization started");
        let service = Arc::clone(&self.service);
        let request = ticket.request().clone();
        let task = tokio::spawn(async move { service.optimize(&request).await });
        Some(InFlight {
            ticket,
            respond_to,
            task,
        })
    }

    async fn settle(
        &mut self,
        pending: InFlight,
        outcome: Result<OptimizationResult, OptimizeError>,
    ) {
        let InFlight {
            ticket, respond_to, ..
        } = pending;
        let result = self
            .orchestrator
            .settle(ticket, outcome, &self.history, self.notifier.as_ref())
            .await
            .map_err(CartError::from);
        if respond_to.send(result).is_err() {
            debug!("Optimize caller went away before settle");
        }
    }
}

/// Resolves with the in-flight task's outcome, or never when nothing is in flight.
async fn wait_for(in_flight: &mut Option<InFlight>) -> Result<OptimizationResult, OptimizeError> {
    match in_flight {
        Some(pending) => join_outcome((&mut pending.task).await),
        None => std::future::pending().await,
    }
}

fn join_outcome(
    joined: Result<Result<OptimizationResult, OptimizeError>, JoinError>,
) -> Result<OptimizationResult, OptimizeError> {
    joined.unwrap_or_else(|e| Err(OptimizeError::Transport(format!("optimization task failed: {e}"))))
}
