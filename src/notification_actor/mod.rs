//! Notification-specific resource logic: the ephemeral, stacked message feed.
//!
//! Each emitted message becomes its own [`Notification`] entity, so concurrent
//! notifications never coalesce or cancel each other.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Notification;

/// Creates a new Notification actor and its client.
pub fn new() -> (ResourceActor<Notification>, ResourceClient<Notification>) {
    ResourceActor::new(64)
}
