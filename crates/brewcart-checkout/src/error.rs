//! # Error Types
//!
//! Domain-specific error types for brewcart-checkout.
//!
//! ## Two-Tier Error Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STRUCTURAL ERRORS (this file + GatewayError/StoreError)               │
//! │  Caller bugs and precondition violations. Raised as Err(..) and       │
//! │  never swallowed: empty order, unavailable gateway, incomplete         │
//! │  shipping, non-positive charge amount.                                 │
//! │                                                                         │
//! │  BUSINESS FAILURES (NOT errors)                                        │
//! │  Card declined, gateway rejection. Travel as CheckoutResult /          │
//! │  PaymentResult with success=false; the caller retries with new         │
//! │  payment details, the order and cart stay usable.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Order Error
// =============================================================================

/// Violations of the order aggregate's rules.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The referenced line item is not in the order.
    #[error("Item {0} not in order")]
    ItemNotFound(String),

    /// Quantities are strictly positive; zero removes the item instead.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// The order is not in a state that allows the requested operation.
    #[error("Order {order_id} is {status}, cannot perform operation")]
    InvalidStatus { order_id: String, status: String },

    /// An item priced in a different currency than the order.
    #[error(transparent)]
    Money(#[from] brewcart_core::MoneyError),
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Checkout precondition violations.
///
/// These fail fast, before settlement, and should be treated as caller
/// bugs (400-class). Business-level payment failures never appear here.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one line item.
    #[error("Order must have items")]
    EmptyOrder,

    /// The payment gateway reported itself unavailable.
    #[error("Payment gateway is not available")]
    GatewayUnavailable,

    /// The full shipping-address field set is required to leave the cart.
    #[error("Incomplete shipping information")]
    IncompleteShipping,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_messages() {
        assert_eq!(CheckoutError::EmptyOrder.to_string(), "Order must have items");
        assert_eq!(
            CheckoutError::IncompleteShipping.to_string(),
            "Incomplete shipping information"
        );
    }

    #[test]
    fn test_order_error_messages() {
        let err = OrderError::InvalidStatus {
            order_id: "ord-1".to_string(),
            status: "completed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Order ord-1 is completed, cannot perform operation"
        );
    }
}
