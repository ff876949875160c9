//! Pure data structures shared by the actors, the optimization client and the history store.

pub mod history;
pub mod item;
pub mod notification;
pub mod optimization;
mod wire;

pub use history::*;
pub use item::*;
pub use notification::*;
pub use optimization::*;
