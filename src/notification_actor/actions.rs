//! Custom actions for the Notification actor.
//!
//! A notification only ever moves forward through its phases, one step per
//! [`NotificationAction::Advance`]. Timing lives in the client; the entity only
//! enforces the order.

/// Custom actions for Notification entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Moves to the next phase and returns it.
    ///
    /// # Errors
    /// Fails once the notification has reached `Removed`.
    Advance,
}
