//! # brewcart-checkout: Order Orchestration for Brewcart
//!
//! Everything between a cart full of coffee and a settled payment: the
//! `Order` aggregate, the pricing facade that composes the calculators
//! from `brewcart-core`, the payment gateway contract (plus the mock
//! used in tests and default wiring), order persistence, and the
//! `CheckoutService` state machine that drives them in sequence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              ★ brewcart-checkout (THIS CRATE) ★                         │
//! │                                                                         │
//! │   ┌─────────┐   ┌──────────┐   ┌─────────────────────────────────┐     │
//! │   │  order  │──►│ pricing  │──►│           service               │     │
//! │   │  Order  │   │ Order-   │   │  Validating ─► ShippingCaptured │     │
//! │   │  Item   │   │ Pricing  │   │     ─► Settling ─► Completed    │     │
//! │   └─────────┘   └──────────┘   └───────┬─────────────────┬───────┘     │
//! │                                        │                 │             │
//! │                                 ┌──────▼─────┐    ┌──────▼─────┐      │
//! │                                 │  gateway   │    │   store    │      │
//! │                                 │  (+ mock)  │    │ (in-memory)│      │
//! │                                 └────────────┘    └────────────┘      │
//! └─────────────────────────────────────┬───────────────────────────────────┘
//!                                       │
//!                              brewcart-core (pure money / tax / shipping)
//! ```
//!
//! ## Failure Taxonomy
//!
//! Caller mistakes (empty order, gateway offline, incomplete address)
//! surface as `Err(CheckoutError)` before any money moves. Business
//! outcomes (a declined card, a gateway fault, a persistence failure
//! mid-settlement) come back as `Ok(CheckoutResult)` with
//! `success == false`, leaving the order chargeable again.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod mock;
pub mod order;
pub mod pricing;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CheckoutError, OrderError};
pub use gateway::{
    validate_amount, ChargeMetadata, GatewayError, PaymentDetails, PaymentGateway, PaymentResult,
};
pub use mock::MockPaymentGateway;
pub use order::{Order, OrderItem, OrderStatus};
pub use pricing::OrderPricing;
pub use service::{
    CheckoutResult, CheckoutService, CheckoutState, ShippingParams, DEFAULT_SHIPPING_COUNTRY,
};
pub use store::{InMemoryOrderStore, OrderStore, StoreError};
