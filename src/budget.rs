//! Budget Monitor: maps cart spend against a budget to a consumption band.
//!
//! Pure functions only. Nothing here touches the cart or the budget.

use serde::Serialize;

/// Lower edge of the medium band, in percent.
const MEDIUM_FROM: f64 = 50.0;
/// Lower edge of the high band, in percent.
const HIGH_FROM: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    /// Spend as a percentage of budget, capped at 100.
    pub ratio_percent: f64,
    pub band: BudgetBand,
}

/// Classifies `spend` against `budget`.
///
/// A budget that is not a finite positive number yields `0%` / [`BudgetBand::Low`].
/// Band edges are inclusive at the bottom: exactly 50% is medium, exactly 90% is high.
pub fn classify(spend: f64, budget: f64) -> BudgetStatus {
    let ratio_percent = if budget.is_finite() && budget > 0.0 {
        (spend / budget * 100.0).min(100.0)
    } else {
        0.0
    };
    let band = if ratio_percent < MEDIUM_FROM {
        BudgetBand::Low
    } else if ratio_percent < HIGH_FROM {
        BudgetBand::Medium
    } else {
        BudgetBand::High
    };
    BudgetStatus {
        ratio_percent,
        band,
    }
}
