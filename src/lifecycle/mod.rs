//! Runtime wiring and lifecycle management.
//!
//! - [`CartSystem`] starts the notification and cart actors, injects the
//!   optimization service and history storage, and shuts everything down.
//! - [`setup_tracing`] initializes the tracing subscriber.

pub mod cart_system;
pub mod tracing;

pub use self::cart_system::*;
pub use self::tracing::*;
