//! # Order Store
//!
//! The persistence seam. The checkout service performs one durable write
//! per persisted transition (shipping capture, completion); the real
//! implementation lives outside this workspace.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::order::Order;

/// Persistence failure for an order write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist order {order_id}: {reason}")]
    SaveFailed { order_id: String, reason: String },
}

/// Durable order persistence.
///
/// Each `save` must be atomic with respect to the in-memory transition it
/// represents: the caller hands over a fully transitioned order and the
/// store either records all of it or fails.
pub trait OrderStore {
    fn save(&self, order: &Order) -> Result<(), StoreError>;
}

/// In-memory store for tests and default wiring.
///
/// Keeps the last saved snapshot per order id, and can be armed to fail
/// a chosen save for failure-path testing.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    saved: Mutex<HashMap<String, Order>>,
    save_count: Mutex<usize>,
    fail_on_save: Mutex<Option<usize>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the store so the next `save` fails.
    pub fn fail_next_save(&self) {
        let count = *self.save_count.lock().expect("store mutex poisoned");
        *self.fail_on_save.lock().expect("store mutex poisoned") = Some(count + 1);
    }

    /// Arms the store so the nth `save` overall (1-based) fails.
    pub fn fail_nth_save(&self, n: usize) {
        *self.fail_on_save.lock().expect("store mutex poisoned") = Some(n);
    }

    /// The last saved snapshot for an order, if any.
    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.saved
            .lock()
            .expect("store mutex poisoned")
            .get(order_id)
            .cloned()
    }

    /// How many snapshots are held.
    pub fn len(&self) -> usize {
        self.saved.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderStore for InMemoryOrderStore {
    fn save(&self, order: &Order) -> Result<(), StoreError> {
        let mut count = self.save_count.lock().expect("store mutex poisoned");
        *count += 1;
        let mut armed = self.fail_on_save.lock().expect("store mutex poisoned");
        if armed.is_some_and(|n| n == *count) {
            *armed = None;
            return Err(StoreError::SaveFailed {
                order_id: order.id.clone(),
                reason: "simulated write failure".to_string(),
            });
        }

        self.saved
            .lock()
            .expect("store mutex poisoned")
            .insert(order.id.clone(), order.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use brewcart_core::{Currency, Money};

    #[test]
    fn test_save_keeps_latest_snapshot() {
        let store = InMemoryOrderStore::new();
        let mut order = Order::new(Currency::USD);
        store.save(&order).unwrap();

        order
            .add_item("v1", "Guatemala Dark Roast", Money::from_minor_units(1_499, Currency::USD), 1)
            .unwrap();
        store.save(&order).unwrap();

        let snapshot = store.get(&order.id).unwrap();
        assert_eq!(snapshot.total().minor_units(), 1_499);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_armed_failure_fires_once() {
        let store = InMemoryOrderStore::new();
        let order = Order::new(Currency::USD);

        store.fail_next_save();
        assert!(matches!(
            store.save(&order),
            Err(StoreError::SaveFailed { .. })
        ));
        // Next save succeeds again
        assert!(store.save(&order).is_ok());
    }

    #[test]
    fn test_nth_save_failure() {
        let store = InMemoryOrderStore::new();
        let order = Order::new(Currency::USD);

        store.fail_nth_save(2);
        assert!(store.save(&order).is_ok());
        assert!(matches!(
            store.save(&order),
            Err(StoreError::SaveFailed { .. })
        ));
        assert!(store.save(&order).is_ok());
    }
}
