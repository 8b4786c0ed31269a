//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           CHECKOUT SERVICE                              │
//! │                                                                         │
//! │  Drives an order from cart to settlement:                               │
//! │                                                                         │
//! │    Validating ──► ShippingCaptured ──► Settling ──► Completed           │
//! │        │                  │                │                            │
//! │        └── Err ◄──────────┘                └──► Failed                  │
//! │                                                                         │
//! │  Two failure channels, deliberately distinct:                           │
//! │   - Caller mistakes (empty order, gateway down, bad address)            │
//! │     return Err(CheckoutError) before any money moves.                   │
//! │   - Business outcomes (declined card, gateway fault, failed             │
//! │     persistence) return Ok(CheckoutResult) with success=false,          │
//! │     leaving the order chargeable again.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘

use brewcart_core::{Money, ShippingCalculator, ShippingContext, TaxCalculator};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CheckoutError;
use crate::gateway::{ChargeMetadata, PaymentDetails, PaymentGateway, PaymentResult};
use crate::order::Order;
use crate::pricing::OrderPricing;
use crate::store::OrderStore;

/// Shipping country assumed when the caller does not provide one.
pub const DEFAULT_SHIPPING_COUNTRY: &str = "US";

const PAYMENT_METHOD_CARD: &str = "credit_card";

// =============================================================================
// Shipping Params
// =============================================================================

/// Shipping address captured at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingParams {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Defaults to [`DEFAULT_SHIPPING_COUNTRY`] when absent.
    pub country: Option<String>,
}

// =============================================================================
// Checkout State
// =============================================================================

/// Progress of a single checkout attempt, logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Validating,
    ShippingCaptured,
    Settling,
    Completed,
    Failed,
}

// =============================================================================
// Checkout Result
// =============================================================================

/// Immutable outcome of a checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResult {
    success: bool,
    order_id: String,
    message: String,
    payment_result: Option<PaymentResult>,
}

impl CheckoutResult {
    fn succeeded(order_id: &str, message: &str, payment_result: PaymentResult) -> Self {
        Self {
            success: true,
            order_id: order_id.to_string(),
            message: message.to_string(),
            payment_result: Some(payment_result),
        }
    }

    fn failed(order_id: &str, message: &str, payment_result: Option<PaymentResult>) -> Self {
        Self {
            success: false,
            order_id: order_id.to_string(),
            message: message.to_string(),
            payment_result,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn failure(&self) -> bool {
        !self.success
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The gateway's verdict, when the attempt got that far.
    pub fn payment_result(&self) -> Option<&PaymentResult> {
        self.payment_result.as_ref()
    }
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Failures inside the settlement pipeline.
///
/// Structural ones bubble out as `Err` to the caller; unexpected ones
/// are absorbed into a failed [`CheckoutResult`] so the order stays
/// chargeable.
enum StepFailure {
    Structural(CheckoutError),
    Unexpected(String),
}

/// Orchestrates validation, shipping capture, pricing, charging and
/// persistence for one order at a time.
///
/// Holds no mutable state of its own; every collaborator comes in by
/// reference so tests can swap in doubles.
pub struct CheckoutService<'a> {
    gateway: &'a dyn PaymentGateway,
    store: &'a dyn OrderStore,
    tax: &'a dyn TaxCalculator,
    shipping: &'a dyn ShippingCalculator,
    tier: Option<String>,
}

impl<'a> CheckoutService<'a> {
    pub fn new(
        gateway: &'a dyn PaymentGateway,
        store: &'a dyn OrderStore,
        tax: &'a dyn TaxCalculator,
        shipping: &'a dyn ShippingCalculator,
    ) -> Self {
        Self {
            gateway,
            store,
            tax,
            shipping,
            tier: None,
        }
    }

    /// Selects a named tier for calculators that price per tier.
    pub fn with_shipping_tier(mut self, name: &str) -> Self {
        self.tier = Some(name.to_string());
        self
    }

    /// Runs the full checkout pipeline for `order`.
    ///
    /// Returns `Err` only for caller mistakes detected before any money
    /// moves. Every later failure comes back as `Ok` with a failed
    /// result, and the order is left in the state the failure found it
    /// in (completion is rolled back if its save does not stick).
    pub fn process(
        &self,
        order: &mut Order,
        shipping_params: &ShippingParams,
        payment_details: &PaymentDetails,
    ) -> Result<CheckoutResult, CheckoutError> {
        debug!(
            order_id = %order.id,
            state = ?CheckoutState::Validating,
            items = order.item_count(),
            "checkout started"
        );
        self.validate_order(order)?;

        match self.settle(order, shipping_params, payment_details) {
            Ok(result) => Ok(result),
            Err(StepFailure::Structural(err)) => Err(err),
            Err(StepFailure::Unexpected(message)) => {
                info!(
                    order_id = %order.id,
                    state = ?CheckoutState::Failed,
                    %message,
                    "checkout failed"
                );
                Ok(CheckoutResult::failed(&order.id, &message, None))
            }
        }
    }

    fn validate_order(&self, order: &Order) -> Result<(), CheckoutError> {
        if !order.has_items() {
            return Err(CheckoutError::EmptyOrder);
        }
        if !self.gateway.available() {
            return Err(CheckoutError::GatewayUnavailable);
        }
        Ok(())
    }

    fn settle(
        &self,
        order: &mut Order,
        shipping_params: &ShippingParams,
        payment_details: &PaymentDetails,
    ) -> Result<CheckoutResult, StepFailure> {
        self.capture_shipping(order, shipping_params)?;
        debug!(
            order_id = %order.id,
            state = ?CheckoutState::ShippingCaptured,
            "shipping captured"
        );

        let grand_total = self.grand_total(order)?;
        debug!(
            order_id = %order.id,
            state = ?CheckoutState::Settling,
            amount = %grand_total,
            "charging gateway"
        );

        let metadata = ChargeMetadata {
            order_id: order.id.clone(),
            items_count: order.item_count(),
        };
        // A gateway that raises is handled the same as one that declines
        let payment_result = self
            .gateway
            .charge(&grand_total, payment_details, &metadata)
            .map_err(|err| StepFailure::Unexpected(err.to_string()))?;

        if payment_result.failure() {
            info!(
                order_id = %order.id,
                state = ?CheckoutState::Failed,
                message = %payment_result.message(),
                "payment rejected"
            );
            let message = payment_result.message().to_string();
            return Ok(CheckoutResult::failed(
                &order.id,
                &message,
                Some(payment_result),
            ));
        }

        self.complete(order, payment_result)
    }

    fn capture_shipping(
        &self,
        order: &mut Order,
        params: &ShippingParams,
    ) -> Result<(), StepFailure> {
        order.shipping_name = Some(params.name.clone());
        order.shipping_address = Some(params.address.clone());
        order.shipping_city = Some(params.city.clone());
        order.shipping_state = Some(params.state.clone());
        order.shipping_zip = Some(params.zip.clone());
        order.shipping_country = Some(
            params
                .country
                .clone()
                .unwrap_or_else(|| DEFAULT_SHIPPING_COUNTRY.to_string()),
        );

        if !order.shipping_address_complete() {
            return Err(StepFailure::Structural(CheckoutError::IncompleteShipping));
        }

        self.store
            .save(order)
            .map_err(|err| StepFailure::Unexpected(err.to_string()))
    }

    fn grand_total(&self, order: &Order) -> Result<Money, StepFailure> {
        let pricing = OrderPricing::new(order, self.tax, self.shipping);
        let mut ctx = ShippingContext::on(Utc::now().date_naive());
        if let Some(tier) = &self.tier {
            ctx = ctx.for_tier(tier);
        }
        pricing
            .grand_total(&ctx)
            .map_err(|err| StepFailure::Unexpected(err.to_string()))
    }

    fn complete(
        &self,
        order: &mut Order,
        payment_result: PaymentResult,
    ) -> Result<CheckoutResult, StepFailure> {
        order.record_completion(PAYMENT_METHOD_CARD, payment_result.transaction_id());

        if let Err(err) = self.store.save(order) {
            // The durable write did not stick, so undo the transition
            order.revert_completion();
            return Err(StepFailure::Unexpected(err.to_string()));
        }

        info!(
            order_id = %order.id,
            state = ?CheckoutState::Completed,
            transaction_id = ?payment_result.transaction_id(),
            "order completed"
        );
        Ok(CheckoutResult::succeeded(
            &order.id,
            "Order completed successfully",
            payment_result,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
