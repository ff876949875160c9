//! Type-safe wrappers around actor message passing.

pub mod actor_client;
pub mod cart_client;
pub mod notification_client;

pub use actor_client::*;
pub use cart_client::*;
pub use notification_client::*;
