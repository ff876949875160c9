use crate::clients::{CartClient, NotificationClient, NotificationTimings};
use crate::config::Settings;
use crate::history::{FileStorage, HistoryStorage, HistoryStore};
use crate::optimizer::{HttpOptimizer, OptimizationService, OptimizeError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

const CART_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to build optimization client: {0}")]
    Optimizer(#[from] OptimizeError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// The running cart: one cart actor and one notification actor.
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::new(&Settings::load(None)?)?;
///
/// system.cart_client.add_item("Milk", 3.5, 4.0).await?;
/// let report = system.cart_client.optimize(10.0).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    pub cart_client: CartClient,
    pub notification_client: NotificationClient,

    /// Cart first: it holds a notification client, so the notification actor
    /// only stops after the cart has.
    handles: Vec<JoinHandle<()>>,
}

impl CartSystem {
    /// Wires the HTTP optimizer and file-backed history from `settings`.
    pub fn new(settings: &Settings) -> Result<Self, SystemError> {
        let service = HttpOptimizer::new(&settings.service_url, settings.request_timeout())?;
        info!(endpoint = %service.endpoint(), history_dir = %settings.history_dir.display(), "Starting cart system");
        let storage = FileStorage::new(settings.history_dir.clone());
        Ok(Self::with_parts(
            Arc::new(service),
            Arc::new(storage),
            &settings.history_key,
            settings.notification_timings(),
        ))
    }

    /// Wires arbitrary service and storage implementations.
    pub fn with_parts(
        service: Arc<dyn OptimizationService>,
        storage: Arc<dyn HistoryStorage>,
        history_key: &str,
        timings: NotificationTimings,
    ) -> Self {
        let (notification_actor, notification_inner) = crate::notification_actor::new();
        let notification_client = NotificationClient::new(notification_inner, timings);

        let history = HistoryStore::new(storage, history_key);
        let (cart_actor, cart_client) = crate::cart_actor::new(
            CART_BUFFER,
            service,
            history,
            Arc::new(notification_client.clone()),
        );

        let cart_handle = tokio::spawn(cart_actor.run());
        let notification_handle = tokio::spawn(notification_actor.run());

        Self {
            cart_client,
            notification_client,
            handles: vec![cart_handle, notification_handle],
        }
    }

    /// Drops the system's clients and waits for both actors to stop.
    ///
    /// Any outstanding optimization is settled first. Clones of the clients held
    /// elsewhere keep their actor alive, so drop them before calling this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cart system...");
        drop(self.cart_client);
        drop(self.notification_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
