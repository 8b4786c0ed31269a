//! # Order Pricing Facade
//!
//! Combines subtotal, tax, and shipping into a grand total.
//!
//! Calculators are injected explicitly rather than constructed or cached by
//! the order itself, so the same order can be priced under different
//! policies and each policy is independently testable.

use brewcart_core::{Money, PricingError, ShippingCalculator, ShippingContext, TaxCalculator};

use crate::order::Order;

/// Prices one order under one tax policy and one shipping policy.
///
/// ## Example
/// ```rust
/// use brewcart_core::{Currency, FlatTaxCalculator, Money, ShippingContext, StandardShipping};
/// use brewcart_checkout::{Order, OrderPricing};
/// use chrono::NaiveDate;
///
/// let mut order = Order::new(Currency::USD);
/// order.add_item("v1", "Espresso Blend 1kg", Money::from_minor_units(1_599, Currency::USD), 2).unwrap();
///
/// let tax = FlatTaxCalculator::new(0.09).unwrap();
/// let shipping = StandardShipping::default();
/// let pricing = OrderPricing::new(&order, &tax, &shipping);
///
/// let ctx = ShippingContext::on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
/// // $31.98 + $2.88 tax + $5.99 shipping
/// assert_eq!(pricing.grand_total(&ctx).unwrap().minor_units(), 4_085);
/// ```
pub struct OrderPricing<'a> {
    order: &'a Order,
    tax: &'a dyn TaxCalculator,
    shipping: &'a dyn ShippingCalculator,
}

impl<'a> OrderPricing<'a> {
    pub fn new(
        order: &'a Order,
        tax: &'a dyn TaxCalculator,
        shipping: &'a dyn ShippingCalculator,
    ) -> Self {
        OrderPricing {
            order,
            tax,
            shipping,
        }
    }

    /// The order's cached subtotal.
    pub fn subtotal(&self) -> Money {
        self.order.total()
    }

    /// Tax on the subtotal under the configured policy.
    pub fn tax(&self) -> Money {
        self.tax.calculate(&self.subtotal())
    }

    /// Shipping cost for the subtotal under the configured policy.
    pub fn shipping_cost(&self, ctx: &ShippingContext) -> Result<Money, PricingError> {
        self.shipping.calculate(&self.subtotal(), ctx)
    }

    /// Subtotal + tax + shipping.
    pub fn grand_total(&self, ctx: &ShippingContext) -> Result<Money, PricingError> {
        let subtotal = self.subtotal();
        let tax = self.tax();
        let shipping = self.shipping_cost(ctx)?;
        // Calculators always quote in the subtotal's currency, so the sum is exact
        Ok(Money::from_minor_units(
            subtotal.minor_units() + tax.minor_units() + shipping.minor_units(),
            subtotal.currency(),
        ))
    }

    /// Whether the order currently ships free.
    pub fn free_shipping(&self, ctx: &ShippingContext) -> bool {
        self.shipping
            .qualifies_for_free_shipping(&self.subtotal(), ctx)
    }

    /// How much more to spend for free shipping, if attainable.
    pub fn remaining_for_free_shipping(&self, ctx: &ShippingContext) -> Option<Money> {
        self.shipping
            .remaining_for_free_shipping(&self.subtotal(), ctx)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
