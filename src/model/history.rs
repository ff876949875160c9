use crate::model::{Item, OptimizationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable record of one completed optimization.
///
/// `items` is an owned copy of the service's selection, so nothing done to the live
/// cart afterwards can reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub budget: f64,
    pub items: Vec<Item>,
    pub total_price: f64,
    pub total_value: f64,
}

impl HistoryEntry {
    /// Builds an entry from the request budget and the service's response.
    pub fn record(budget: f64, result: &OptimizationResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            budget,
            items: result.selected_items.clone(),
            total_price: result.total_price,
            total_value: result.total_value,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self
            .items
            .iter()
            .map(|i| format!("{} ({})", i.name(), i.price()))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "{}", self.timestamp.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Budget: {}", self.budget)?;
        writeln!(f, "Items: {items}")?;
        write!(
            f,
            "Total Price: {} | Total Value: {}",
            self.total_price, self.total_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_serializes_camel_case() {
        let result = OptimizationResult {
            selected_items: vec![Item::new("B", 20.0, 15.0).unwrap()],
            total_price: 20.0,
            total_value: 15.0,
            session_id: Some("abc".into()),
        };
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let entry = HistoryEntry::record(20.0, &result, ts);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["totalPrice"], 20.0);
        assert_eq!(json["totalValue"], 15.0);
        assert_eq!(json["budget"], 20.0);
        assert_eq!(json["items"][0]["name"], "B");
        assert!(json.get("sessionId").is_none());

        let text = entry.to_string();
        assert!(text.starts_with("2024-05-01 12:30:00"));
        assert!(text.contains("Items: B (20)"));
    }
}
