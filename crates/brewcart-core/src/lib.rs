//! # brewcart-core: Pure Pricing Logic for Brewcart
//!
//! This crate is the **heart** of the Brewcart checkout: exact money
//! arithmetic and the pluggable tax/shipping strategies, as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Brewcart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 brewcart-checkout (orchestration)               │   │
//! │  │    Order aggregate ──► OrderPricing ──► CheckoutService        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brewcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │    tax    │  │ shipping  │  │   error   │  │   │
//! │  │   │   Money   │  │ Flat/     │  │ Standard/ │  │ Money/    │  │   │
//! │  │   │  Currency │  │ Regional  │  │ Promo/    │  │ Pricing   │  │   │
//! │  │   │           │  │           │  │ Tiered    │  │ errors    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: monetary values are integer minor units plus a
//!    currency code; decimals are rounded half-up once, at construction
//! 2. **Composition over inheritance**: calculator variants share a
//!    capability trait and delegate explicitly
//! 3. **No I/O**: even the clock is an input: evaluation dates and order
//!    times are passed in, never read from the system
//! 4. **Explicit Errors**: malformed configuration is a typed error, never
//!    a panic or a silent default
//!
//! ## Example Usage
//!
//! ```rust
//! use brewcart_core::money::{Currency, Money};
//! use brewcart_core::tax::{FlatTaxCalculator, TaxCalculator};
//!
//! let subtotal = Money::from_minor_units(3_198, Currency::USD); // $31.98
//! let tax = FlatTaxCalculator::new(0.09).unwrap().calculate(&subtotal);
//! assert_eq!(tax.minor_units(), 288); // $2.88, rounded half-up
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod shipping;
pub mod tax;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use brewcart_core::Money` instead of
// `use brewcart_core::money::Money`

pub use error::{MoneyError, PricingError};
pub use money::{Currency, Money};
pub use shipping::{
    PromotionalShipping, ShippingCalculator, ShippingContext, ShippingTier, StandardShipping,
    TierQuote, TieredShipping, FREE_SHIPPING_THRESHOLD, STANDARD_SHIPPING_COST,
};
pub use tax::{
    FlatTaxCalculator, RegionKind, RegionalTaxCalculator, TaxCalculator, DEFAULT_TAX_RATE,
};
