//! Item Ledger: the ordered cart contents.
//!
//! The ledger validates every addition, never merges or reorders entries, and
//! publishes a [`CartEvent`] on a broadcast channel after each successful mutation
//! so display code can follow the cart without being called back from here.

use crate::budget::{self, BudgetStatus};
use crate::error::{IndexError, ValidationError};
use crate::model::Item;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the change feed. Slow subscribers observe `Lagged` and resync.
const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum CartChange {
    Added { index: usize, item: Item },
    Removed { index: usize, item: Item },
}

/// Published after every successful ledger mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEvent {
    pub change: CartChange,
    /// Cart length after the change.
    pub len: usize,
    /// Sum of item prices after the change.
    pub spend: f64,
}

impl CartEvent {
    /// Budget Monitor reading for this event's spend.
    pub fn budget_status(&self, budget: f64) -> BudgetStatus {
        budget::classify(self.spend, budget)
    }
}

#[derive(Debug)]
pub struct ItemLedger {
    items: Vec<Item>,
    events: broadcast::Sender<CartEvent>,
}

impl Default for ItemLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemLedger {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            items: Vec::new(),
            events,
        }
    }

    /// Validates and appends an item to the end of the cart.
    pub fn add(&mut self, name: &str, price: f64, value: f64) -> Result<Item, ValidationError> {
        let item = Item::new(name, price, value)?;
        self.items.push(item.clone());
        let index = self.items.len() - 1;
        debug!(index, name = item.name(), len = self.items.len(), "Item added");
        self.publish(CartChange::Added {
            index,
            item: item.clone(),
        });
        Ok(item)
    }

    /// Removes exactly the item at `index`; the rest keep their relative order.
    pub fn remove_at(&mut self, index: usize) -> Result<Item, IndexError> {
        if index >= self.items.len() {
            return Err(IndexError {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        debug!(index, name = item.name(), len = self.items.len(), "Item removed");
        self.publish(CartChange::Removed {
            index,
            item: item.clone(),
        });
        Ok(item)
    }

    /// Owned copy of the cart in insertion order.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_spend(&self) -> f64 {
        self.items.iter().map(Item::price).sum()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Handle that lets callers subscribe without going through the ledger owner.
    pub fn event_sender(&self) -> broadcast::Sender<CartEvent> {
        self.events.clone()
    }

    fn publish(&self, change: CartChange) {
        // No subscribers is fine.
        let _ = self.events.send(CartEvent {
            change,
            len: self.items.len(),
            spend: self.total_spend(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetBand;

    fn names(ledger: &ItemLedger) -> Vec<String> {
        ledger.snapshot().iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn test_adds_keep_call_order_and_duplicates() {
        let mut ledger = ItemLedger::new();
        ledger.add("A", 10.0, 5.0).unwrap();
        ledger.add("B", 20.0, 15.0).unwrap();
        ledger.add("A", 10.0, 5.0).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(names(&ledger), vec!["A", "B", "A"]);
        assert_eq!(ledger.total_spend(), 40.0);
    }

    #[test]
    fn test_invalid_add_leaves_cart_unchanged() {
        let mut ledger = ItemLedger::new();
        ledger.add("A", 10.0, 5.0).unwrap();
        let before = ledger.snapshot();

        assert_eq!(ledger.add(" ", 1.0, 1.0), Err(ValidationError::EmptyName));
        assert_eq!(ledger.add("B", 0.0, 1.0), Err(ValidationError::InvalidPrice(0.0)));
        assert_eq!(ledger.add("B", 1.0, -2.0), Err(ValidationError::InvalidValue(-2.0)));

        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_remove_at_removes_exactly_that_item() {
        let mut ledger = ItemLedger::new();
        for name in ["A", "B", "C", "D"] {
            ledger.add(name, 1.0, 1.0).unwrap();
        }

        let removed = ledger.remove_at(1).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(names(&ledger), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut ledger = ItemLedger::new();
        ledger.add("A", 1.0, 1.0).unwrap();

        assert_eq!(ledger.remove_at(1), Err(IndexError { index: 1, len: 1 }));
        assert_eq!(names(&ledger), vec!["A"]);

        let mut empty = ItemLedger::new();
        assert_eq!(empty.remove_at(0), Err(IndexError { index: 0, len: 0 }));
    }

    #[test]
    fn test_snapshot_is_decoupled() {
        let mut ledger = ItemLedger::new();
        ledger.add("A", 1.0, 1.0).unwrap();
        let snapshot = ledger.snapshot();

        ledger.add("B", 2.0, 2.0).unwrap();
        ledger.remove_at(0).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name(), "A");
    }

    #[test]
    fn test_mutations_publish_events() {
        let mut ledger = ItemLedger::new();
        let mut events = ledger.subscribe();

        ledger.add("A", 30.0, 5.0).unwrap();
        ledger.add("B", 40.0, 5.0).unwrap();
        let _ = ledger.add("", 1.0, 1.0);
        ledger.remove_at(0).unwrap();

        let added = events.try_recv().unwrap();
        assert_eq!(added.len, 1);
        assert_eq!(added.spend, 30.0);
        assert!(matches!(added.change, CartChange::Added { index: 0, .. }));

        let added = events.try_recv().unwrap();
        assert_eq!(added.spend, 70.0);
        assert_eq!(added.budget_status(100.0).band, BudgetBand::Medium);

        let removed = events.try_recv().unwrap();
        assert_eq!(removed.len, 1);
        assert_eq!(removed.spend, 40.0);
        match removed.change {
            CartChange::Removed { index, item } => {
                assert_eq!(index, 0);
                assert_eq!(item.name(), "A");
            }
            other => panic!("Expected Removed, got {other:?}"),
        }

        // The rejected add published nothing.
        assert!(events.try_recv().is_err());
    }
}
