//! # Order Aggregate
//!
//! The order lifecycle and its line items.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Lifecycle                                  │
//! │                                                                         │
//! │     cart ────────► pending ────────► completed                         │
//! │       │               │                                                 │
//! │       └───────────────┴────────────► cancelled                         │
//! │                                                                         │
//! │  Shipping-address and payment fields are required only once the        │
//! │  order leaves the cart state. The cancelled path exists in the         │
//! │  taxonomy but is not exercised by the checkout flow.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cached Total Invariant
//! `total == sum(item.price * item.quantity)` holds after every mutating
//! operation: each mutation ends with a synchronous recalculation. The item
//! list is private so nothing can bypass that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewcart_core::{Currency, Money, MoneyError};

use crate::error::OrderError;

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Items being added; the active cart.
    Cart,
    /// Checkout has begun but not settled.
    Pending,
    /// Paid and finalized.
    Completed,
    /// Abandoned or cancelled.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Cart
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Cart => "cart",
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item. Uses the snapshot pattern: name and unit price are frozen
/// at add-time, so later catalog changes never reprice an existing cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog variant this line refers to (e.g. a coffee variant).
    pub variant_id: String,
    /// Display name at time of adding (frozen).
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub unit_price: Money,
    /// Quantity ordered.
    pub quantity: i64,
}

impl OrderItem {
    /// Line subtotal: unit price × quantity.
    pub fn subtotal(&self) -> Money {
        Money::from_minor_units(
            self.unit_price.minor_units() * self.quantity,
            self.unit_price.currency(),
        )
    }
}

// =============================================================================
// Order
// =============================================================================

/// The order aggregate: line items, shipping address, payment fields,
/// and a cached subtotal kept consistent by recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    status: OrderStatus,
    currency: Currency,
    items: Vec<OrderItem>,

    pub shipping_name: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_zip: Option<String>,
    pub shipping_country: Option<String>,

    payment_method: Option<String>,
    payment_transaction_id: Option<String>,

    /// Cached subtotal in minor units; see the module invariant.
    total_minor_units: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4().to_string(),
            status: OrderStatus::Cart,
            currency,
            items: Vec::new(),
            shipping_name: None,
            shipping_address: None,
            shipping_city: None,
            shipping_state: None,
            shipping_zip: None,
            shipping_country: None,
            payment_method: None,
            payment_transaction_id: None,
            total_minor_units: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    pub fn payment_transaction_id(&self) -> Option<&str> {
        self.payment_transaction_id.as_deref()
    }

    /// The cached subtotal as Money.
    pub fn total(&self) -> Money {
        Money::from_minor_units(self.total_minor_units, self.currency)
    }

    /// Adds a variant to the order, or increases quantity if already present.
    ///
    /// The name and unit price are snapshotted on first add; adding the same
    /// variant again only bumps the quantity.
    ///
    /// ## Errors
    /// - `OrderError::InvalidQuantity` for a non-positive quantity
    /// - `OrderError::InvalidStatus` once the order has left the cart state
    /// - `OrderError::Money` if the price currency differs from the order's
    pub fn add_item(
        &mut self,
        variant_id: &str,
        name: &str,
        unit_price: Money,
        quantity: i64,
    ) -> Result<(), OrderError> {
        self.ensure_mutable()?;
        if quantity <= 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        if unit_price.currency() != self.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.code().to_string(),
                right: unit_price.currency().code().to_string(),
            }
            .into());
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity += quantity;
        } else {
            self.items.push(OrderItem {
                variant_id: variant_id.to_string(),
                name: name.to_string(),
                unit_price,
                quantity,
            });
        }

        self.recalculate_total();
        Ok(())
    }

    /// Updates the quantity of a line item; zero removes it.
    pub fn update_quantity(&mut self, variant_id: &str, quantity: i64) -> Result<(), OrderError> {
        self.ensure_mutable()?;
        if quantity == 0 {
            return self.remove_item(variant_id);
        }
        if quantity < 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.variant_id == variant_id)
            .ok_or_else(|| OrderError::ItemNotFound(variant_id.to_string()))?;
        item.quantity = quantity;

        self.recalculate_total();
        Ok(())
    }

    /// Removes a line item by variant id.
    pub fn remove_item(&mut self, variant_id: &str) -> Result<(), OrderError> {
        self.ensure_mutable()?;
        let initial_len = self.items.len();
        self.items.retain(|i| i.variant_id != variant_id);
        if self.items.len() == initial_len {
            return Err(OrderError::ItemNotFound(variant_id.to_string()));
        }

        self.recalculate_total();
        Ok(())
    }

    /// Recomputes the cached total from the line items.
    ///
    /// Idempotent: calling it twice without mutating items yields the same
    /// total both times.
    pub fn recalculate_total(&mut self) {
        self.total_minor_units = self
            .items
            .iter()
            .map(|i| i.subtotal().minor_units())
            .sum();
        self.updated_at = Utc::now();
    }

    /// Whether the full shipping-address field set is present and non-blank.
    pub fn shipping_address_complete(&self) -> bool {
        [
            &self.shipping_name,
            &self.shipping_address,
            &self.shipping_city,
            &self.shipping_state,
            &self.shipping_zip,
            &self.shipping_country,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Cancels the order. Completed orders cannot be cancelled.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if self.status == OrderStatus::Completed {
            return Err(OrderError::InvalidStatus {
                order_id: self.id.clone(),
                status: self.status.as_str().to_string(),
            });
        }
        self.status = OrderStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    // Settlement transitions below are crate-internal: only the checkout
    // service moves an order out of (or back into) the cart state.

    pub(crate) fn record_completion(&mut self, payment_method: &str, transaction_id: Option<&str>) {
        self.status = OrderStatus::Completed;
        self.payment_method = Some(payment_method.to_string());
        self.payment_transaction_id = transaction_id.map(str::to_string);
        self.updated_at = Utc::now();
    }

    pub(crate) fn revert_completion(&mut self) {
        self.status = OrderStatus::Cart;
        self.payment_method = None;
        self.payment_transaction_id = None;
        self.updated_at = Utc::now();
    }

    fn ensure_mutable(&self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Cart | OrderStatus::Pending => Ok(()),
            _ => Err(OrderError::InvalidStatus {
                order_id: self.id.clone(),
                status: self.status.as_str().to_string(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
