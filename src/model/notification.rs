/// Represents one user-facing message on the notification stack.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`crate::notification_actor`] for the lifecycle rules:
/// `Entering -> Visible -> Exiting -> Removed`.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for notifications. Assigned in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u32);

impl From<u32> for NotificationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    Entering,
    Visible,
    Exiting,
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub phase: NotificationPhase,
}

/// Payload for emitting a new notification.
#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub message: String,
    pub severity: Severity,
}
