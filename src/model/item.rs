use super::wire::whole_as_integer;
use crate::error::{is_positive, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named candidate purchase with a price and a value score.
///
/// Fields are private so a cart item can only come from [`Item::new`]. Items decoded
/// from the optimization service skip validation; the service is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    #[serde(serialize_with = "whole_as_integer")]
    price: f64,
    #[serde(serialize_with = "whole_as_integer")]
    value: f64,
}

impl Item {
    /// Validates and builds an item. The name is stored trimmed.
    ///
    /// # Errors
    /// [`ValidationError::EmptyName`] for a blank name, [`ValidationError::InvalidPrice`]
    /// or [`ValidationError::InvalidValue`] for anything that is not a finite number > 0.
    pub fn new(name: &str, price: f64, value: f64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_positive(price) {
            return Err(ValidationError::InvalidPrice(price));
        }
        if !is_positive(value) {
            return Err(ValidationError::InvalidValue(value));
        }
        Ok(Self {
            name: name.to_string(),
            price,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, Value: {}", self.name, self.price, self.value)
    }
}
