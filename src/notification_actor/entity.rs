//! Entity trait implementation for the Notification domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Notification`] to be managed by the generic [`crate::framework::ResourceActor`].

use super::actions::NotificationAction;
use super::error::NotificationError;
use crate::framework::ActorEntity;
use crate::model::{Notification, NotificationCreate, NotificationId, NotificationPhase};

impl NotificationPhase {
    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Entering => Some(Self::Visible),
            Self::Visible => Some(Self::Exiting),
            Self::Exiting => Some(Self::Removed),
            Self::Removed => None,
        }
    }
}

impl ActorEntity for Notification {
    type Id = NotificationId;
    type Create = NotificationCreate;
    type Action = NotificationAction;
    type ActionResult = NotificationPhase;
    type Error = NotificationError;

    /// Every notification starts out `Entering`.
    fn from_create_params(id: NotificationId, params: NotificationCreate) -> Result<Self, Self::Error> {
        if params.message.trim().is_empty() {
            return Err(NotificationError::EmptyMessage);
        }
        Ok(Self {
            id,
            message: params.message,
            severity: params.severity,
            phase: NotificationPhase::Entering,
        })
    }

    /// Only a `Removed` notification may leave the stack.
    fn on_delete(&self) -> Result<(), Self::Error> {
        match self.phase {
            NotificationPhase::Removed => Ok(()),
            phase => Err(NotificationError::InvalidTransition(phase)),
        }
    }

    fn handle_action(&mut self, action: NotificationAction) -> Result<NotificationPhase, Self::Error> {
        match action {
            NotificationAction::Advance => {
                let next = self
                    .phase
                    .next()
                    .ok_or(NotificationError::InvalidTransition(self.phase))?;
                self.phase = next;
                Ok(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    fn notification(message: &str) -> Result<Notification, NotificationError> {
        Notification::from_create_params(
            NotificationId(1),
            NotificationCreate {
                message: message.to_string(),
                severity: Severity::Info,
            },
        )
    }

    #[test]
    fn test_phases_advance_in_order() {
        let mut n = notification("hello").unwrap();
        assert_eq!(n.phase, NotificationPhase::Entering);
        assert!(n.on_delete().is_err());

        assert_eq!(n.handle_action(NotificationAction::Advance), Ok(NotificationPhase::Visible));
        assert_eq!(n.handle_action(NotificationAction::Advance), Ok(NotificationPhase::Exiting));
        assert!(n.on_delete().is_err());
        assert_eq!(n.handle_action(NotificationAction::Advance), Ok(NotificationPhase::Removed));
        assert_eq!(n.on_delete(), Ok(()));

        assert_eq!(
            n.handle_action(NotificationAction::Advance),
            Err(NotificationError::InvalidTransition(NotificationPhase::Removed))
        );
    }

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(notification("  ").unwrap_err(), NotificationError::EmptyMessage);
    }
}
