//! # Error Types
//!
//! Domain-specific error types for brewcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brewcart-core errors (this file)                                      │
//! │  ├── MoneyError      - Invalid money operands (currency mismatch, ...) │
//! │  └── PricingError    - Malformed calculator configuration              │
//! │                                                                         │
//! │  brewcart-checkout errors (separate crate)                             │
//! │  ├── OrderError      - Order aggregate violations                      │
//! │  ├── GatewayError    - Payment gateway contract violations             │
//! │  └── CheckoutError   - Checkout precondition failures                  │
//! │                                                                         │
//! │  Everything here is STRUCTURAL: a caller bug, never a business-level   │
//! │  payment rejection (those travel as non-error results).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (currency codes, tier names, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Money Error
// =============================================================================

/// Errors raised by invalid money operations.
///
/// Arithmetic between two `Money` values requires identical currencies;
/// anything else is a programming error, surfaced loudly here.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Arithmetic or comparison attempted across currencies.
    #[error("Cannot perform operation on different currencies: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// A currency code that is not three ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Division of a money value by zero.
    #[error("Cannot divide a money value by zero")]
    DivisionByZero,
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised by malformed tax/shipping calculator configuration
/// or by an invalid calculation request (e.g. an unknown shipping tier).
#[derive(Debug, Error)]
pub enum PricingError {
    /// Tax rates are fractions: 0.0725 means 7.25%.
    #[error("Tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(f64),

    /// Shipping costs can be zero (free) but never negative.
    #[error("{field} cannot be negative")]
    NegativeAmount { field: String },

    /// A required name was empty or whitespace.
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    /// Promotion windows must run forwards in time.
    #[error("Promotion start date must be on or before end date")]
    InvalidDateRange,

    /// Tier selection is by explicit name lookup, never automatic.
    #[error("Shipping tier '{0}' not found")]
    UnknownTier(String),

    /// Tiered shipping was asked for a quote without a tier selection.
    #[error("A shipping tier must be selected for tiered shipping")]
    MissingTier,

    /// A tiered calculator with no tiers can never produce a quote.
    #[error("Tiered shipping requires at least one tier")]
    NoTiers,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_error_messages() {
        let err = MoneyError::CurrencyMismatch {
            left: "USD".to_string(),
            right: "EUR".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot perform operation on different currencies: USD vs EUR"
        );

        assert_eq!(
            MoneyError::DivisionByZero.to_string(),
            "Cannot divide a money value by zero"
        );
    }

    #[test]
    fn test_pricing_error_messages() {
        assert_eq!(
            PricingError::InvalidTaxRate(1.5).to_string(),
            "Tax rate must be between 0 and 1, got 1.5"
        );

        assert_eq!(
            PricingError::UnknownTier("Drone Shipping".to_string()).to_string(),
            "Shipping tier 'Drone Shipping' not found"
        );

        let err = PricingError::NegativeAmount {
            field: "standard shipping cost".to_string(),
        };
        assert_eq!(err.to_string(), "standard shipping cost cannot be negative");
    }
}
