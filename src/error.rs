//! Domain errors shared by the item ledger and the optimization orchestrator.
//!
//! Both are handled locally: they never reach the optimization service and they
//! leave cart and history untouched.

use thiserror::Error;

/// Input rejected before any state change or network call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// Item name was empty or whitespace only.
    #[error("Item name must not be empty")]
    EmptyName,

    /// Item price was not a finite number greater than zero.
    #[error("Item price must be a positive number, got {0}")]
    InvalidPrice(f64),

    /// Item value was not a finite number greater than zero.
    #[error("Item value must be a positive number, got {0}")]
    InvalidValue(f64),

    /// Budget was not a finite number greater than zero.
    #[error("Budget must be a positive number, got {0}")]
    InvalidBudget(f64),

    /// Optimization was requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Optimization was requested while another request is outstanding.
    #[error("An optimization request is already in flight")]
    RequestInFlight,
}

impl ValidationError {
    /// Text shown to the user in the warning notification.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::InvalidPrice(_) | Self::InvalidValue(_) => {
                "Please enter valid item details"
            }
            Self::InvalidBudget(_) => "Please enter a valid budget",
            Self::EmptyCart => "Cart is empty",
            Self::RequestInFlight => "Optimization already in progress",
        }
    }
}

/// A removal addressed a position outside the cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Index {index} is out of range for a cart of {len} items")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Returns true for finite numbers strictly greater than zero.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
