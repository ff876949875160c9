use super::wire::whole_as_integer;
use crate::model::Item;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the display-only session label synthesized when the service sends none.
const SESSION_LABEL_LEN: usize = 6;

/// Body of `POST /optimize`: the budget and an immutable snapshot of the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRequest {
    #[serde(serialize_with = "whole_as_integer")]
    pub budget: f64,
    pub items: Vec<Item>,
}

/// A successful response from the optimization service, already decoded and typed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub selected_items: Vec<Item>,
    pub total_price: f64,
    pub total_value: f64,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// What a caller of `optimize` gets back once the result has been committed.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    pub result: OptimizationResult,
    /// The service session id, or a synthesized cosmetic label. Never persisted.
    pub session_label: String,
}

impl OptimizationReport {
    pub fn new(result: OptimizationResult) -> Self {
        let session_label = result
            .session_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(synthesize_session_label);
        Self {
            result,
            session_label,
        }
    }
}

/// Random 6-character uppercase alphanumeric label.
pub fn synthesize_session_label() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_LABEL_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.result;
        writeln!(f, "Session #{}", self.session_label)?;
        if result.selected_items.is_empty() {
            writeln!(f, "  No items fit the budget")?;
        }
        for item in &result.selected_items {
            writeln!(f, "  {item}")?;
        }
        write!(
            f,
            "  Total Price: {:.2} | Total Value: {:.2} | Items: {}",
            result.total_price,
            result.total_value,
            result.selected_items.len()
        )
    }
}
