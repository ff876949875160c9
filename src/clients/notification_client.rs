//! # Notification Client
//!
//! Wraps a `ResourceClient<Notification>` and owns the timing half of the notification
//! lifecycle: after each emit a background task advances the entity
//! `Entering -> Visible -> Exiting -> Removed` and then deletes it.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient, WeakResourceClient};
use crate::model::{Notification, NotificationCreate, NotificationId, Severity};
use crate::notification_actor::{NotificationAction, NotificationError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Phase durations of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    /// Delay before an entering notification becomes visible.
    pub reveal: Duration,
    /// How long a notification stays visible.
    pub dwell: Duration,
    /// Exit animation time before removal.
    pub exit: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(10),
            dwell: Duration::from_millis(2500),
            exit: Duration::from_millis(300),
        }
    }
}

/// Anything that can surface a severity-tagged message to the user.
///
/// Delivery is best effort: implementations log failures instead of returning them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str, severity: Severity);
}

/// Client for interacting with the Notification actor.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ResourceClient<Notification>,
    timings: NotificationTimings,
}

impl NotificationClient {
    pub fn new(inner: ResourceClient<Notification>, timings: NotificationTimings) -> Self {
        Self { inner, timings }
    }

    /// Pushes a new notification onto the stack and schedules its lifecycle.
    #[instrument(skip(self, message))]
    pub async fn emit(
        &self,
        message: impl Into<String> + Send,
        severity: Severity,
    ) -> Result<NotificationId, NotificationError> {
        let params = NotificationCreate {
            message: message.into(),
            severity,
        };
        debug!(?params, "Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        tokio::spawn(run_lifecycle(self.inner.downgrade(), id, self.timings));
        Ok(id)
    }

    /// Live notifications in stacking order.
    pub async fn active(&self) -> Result<Vec<Notification>, NotificationError> {
        self.list().await
    }
}

async fn run_lifecycle(
    client: WeakResourceClient<Notification>,
    id: NotificationId,
    timings: NotificationTimings,
) {
    for delay in [timings.reveal, timings.dwell, timings.exit] {
        tokio::time::sleep(delay).await;
        let Some(client) = client.upgrade() else {
            return;
        };
        match client.perform_action(id, NotificationAction::Advance).await {
            Ok(phase) => debug!(%id, ?phase, "Notification advanced"),
            Err(e) => {
                debug!(%id, error = %e, "Notification lifecycle stopped");
                return;
            }
        }
    }
    if let Some(client) = client.upgrade() {
        if let Err(e) = client.delete(id).await {
            debug!(%id, error = %e, "Notification removal failed");
        }
    }
}

#[async_trait]
impl ActorClient<Notification> for NotificationClient {
    type Error = NotificationError;

    fn inner(&self) -> &ResourceClient<Notification> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        NotificationError::ActorCommunicationError(e.to_string())
    }
}

#[async_trait]
impl Notifier for NotificationClient {
    async fn notify(&self, message: &str, severity: Severity) {
        if let Err(e) = self.emit(message, severity).await {
            warn!(error = %e, message, "Failed to emit notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{
        create_mock_client, expect_action, expect_create, expect_delete, expect_list,
    };
    use crate::model::NotificationPhase;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_emit_drives_full_lifecycle() {
        let (client, mut receiver) = create_mock_client::<Notification>(10);
        let notifications = NotificationClient::new(client, NotificationTimings::default());
        // The lifecycle task only holds a weak handle; keep a strong one alive.
        let _keep_alive = notifications.clone();

        let emit_task =
            tokio::spawn(async move { notifications.emit("Added: Milk", Severity::Success).await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.message, "Added: Milk");
        assert_eq!(params.severity, Severity::Success);
        responder.send(Ok(NotificationId(7))).unwrap();
        assert_eq!(emit_task.await.unwrap().unwrap(), NotificationId(7));

        let started = Instant::now();
        for phase in [
            NotificationPhase::Visible,
            NotificationPhase::Exiting,
            NotificationPhase::Removed,
        ] {
            let (id, action, responder) = expect_action(&mut receiver)
                .await
                .expect("Expected Action request");
            assert_eq!(id, NotificationId(7));
            assert_eq!(action, NotificationAction::Advance);
            responder.send(Ok(phase)).unwrap();
        }

        let (id, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, NotificationId(7));
        responder.send(Ok(())).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2800));
    }

    #[tokio::test]
    async fn test_emit_maps_framework_errors() {
        let (client, mut receiver) = create_mock_client::<Notification>(10);
        let notifications = NotificationClient::new(client, NotificationTimings::default());

        let emit_task = tokio::spawn(async move { notifications.emit("x", Severity::Info).await });
        let (_, responder) = expect_create(&mut receiver).await.unwrap();
        responder.send(Err(FrameworkError::ActorClosed)).unwrap();

        let err = emit_task.await.unwrap().unwrap_err();
        assert_eq!(
            err,
            NotificationError::ActorCommunicationError("Actor closed".to_string())
        );
    }

    #[tokio::test]
    async fn test_active_lists_via_actor() {
        let (client, mut receiver) = create_mock_client::<Notification>(10);
        let notifications = NotificationClient::new(client, NotificationTimings::default());

        let list_task = tokio::spawn(async move { notifications.active().await });
        let responder = expect_list(&mut receiver).await.unwrap();
        responder
            .send(Ok(vec![Notification {
                id: NotificationId(3),
                message: "Removed: Milk".into(),
                severity: Severity::Danger,
                phase: NotificationPhase::Visible,
            }]))
            .unwrap();

        let active = list_task.await.unwrap().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, NotificationId(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_stack_and_expire_independently() {
        let (actor, client) = crate::notification_actor::new();
        tokio::spawn(actor.run());
        let notifications = NotificationClient::new(client, NotificationTimings::default());

        notifications.emit("first", Severity::Success).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        notifications.emit("second", Severity::Danger).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let active = notifications.active().await.unwrap();
        let messages: Vec<&str> = active.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(active.iter().all(|n| n.phase == NotificationPhase::Visible));

        // first: emitted at 0, gone after 2.81s; second still visible
        tokio::time::sleep(Duration::from_millis(1900)).await;
        let active = notifications.active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "second");

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(notifications.active().await.unwrap().is_empty());
    }
}
