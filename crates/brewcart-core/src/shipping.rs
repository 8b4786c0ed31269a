//! # Shipping Calculators
//!
//! Pluggable shipping-cost strategies over a shared capability trait.
//!
//! ## Strategy Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ShippingCalculator (trait)                           │
//! │                                                                         │
//! │  StandardShipping          PromotionalShipping       TieredShipping    │
//! │  ────────────────          ───────────────────       ──────────────    │
//! │  free above a              wraps a StandardShipping  named tiers, each │
//! │  threshold, else a         and overrides it inside   with its own cost │
//! │  flat cost                 a [start, end] date       threshold, days,  │
//! │                            window (composition,      and cutoff time;  │
//! │                            not inheritance)          explicit lookup   │
//! │                                                                         │
//! │  Every quote is produced in the input amount's currency, and every     │
//! │  threshold comparison happens on exact integer minor units.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::money::{Currency, Money};

/// Default minimum subtotal for free shipping ($50.00).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_minor_units(5_000, Currency::USD);

/// Default flat shipping cost below the threshold ($5.99).
pub const STANDARD_SHIPPING_COST: Money = Money::from_minor_units(599, Currency::USD);

// =============================================================================
// Shipping Context
// =============================================================================

/// Inputs a shipping quote may depend on beyond the amount itself:
/// the evaluation date (promotions) and an explicit tier selection (tiers).
#[derive(Debug, Clone)]
pub struct ShippingContext {
    date: NaiveDate,
    tier: Option<String>,
}

impl ShippingContext {
    /// Context for a quote evaluated on the given date, with no tier selected.
    pub fn on(date: NaiveDate) -> Self {
        ShippingContext { date, tier: None }
    }

    /// Selects a shipping tier by name.
    pub fn for_tier(mut self, name: &str) -> Self {
        self.tier = Some(name.to_string());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn tier(&self) -> Option<&str> {
        self.tier.as_deref()
    }
}

// =============================================================================
// ShippingCalculator Trait
// =============================================================================

/// Capability shared by every shipping strategy.
pub trait ShippingCalculator {
    /// Quotes the shipping cost for an order subtotal.
    ///
    /// The quote is always produced in the subtotal's currency.
    fn calculate(&self, amount: &Money, ctx: &ShippingContext) -> Result<Money, PricingError>;

    /// Whether the subtotal qualifies for free shipping.
    fn qualifies_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> bool;

    /// How much more needs to be spent for free shipping,
    /// or `None` if the subtotal already qualifies (or never can).
    fn remaining_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> Option<Money>;
}

// Thresholds are value comparisons on exact minor units.
#[inline]
fn meets_threshold(amount: &Money, threshold: &Money) -> bool {
    amount.minor_units() >= threshold.minor_units()
}

// Re-expresses a configured cost in the currency of the amount being quoted.
#[inline]
fn quote_in(amount: &Money, cost: &Money) -> Money {
    Money::from_minor_units(cost.minor_units(), amount.currency())
}

// =============================================================================
// Standard Shipping
// =============================================================================

/// Free above a threshold, otherwise a flat cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardShipping {
    free_threshold: Money,
    standard_cost: Money,
}

impl StandardShipping {
    /// Creates a standard calculator.
    ///
    /// ## Errors
    /// `PricingError::NegativeAmount` if the standard cost is negative.
    pub fn new(free_threshold: Money, standard_cost: Money) -> Result<Self, PricingError> {
        if standard_cost.is_negative() {
            return Err(PricingError::NegativeAmount {
                field: "standard shipping cost".to_string(),
            });
        }
        Ok(StandardShipping {
            free_threshold,
            standard_cost,
        })
    }

    pub fn free_threshold(&self) -> &Money {
        &self.free_threshold
    }

    pub fn standard_cost(&self) -> &Money {
        &self.standard_cost
    }

    fn cost_for(&self, amount: &Money) -> Money {
        if meets_threshold(amount, &self.free_threshold) {
            Money::zero(amount.currency())
        } else {
            quote_in(amount, &self.standard_cost)
        }
    }
}

/// Default policy: free at $50.00, otherwise $5.99.
impl Default for StandardShipping {
    fn default() -> Self {
        StandardShipping {
            free_threshold: FREE_SHIPPING_THRESHOLD,
            standard_cost: STANDARD_SHIPPING_COST,
        }
    }
}

impl ShippingCalculator for StandardShipping {
    fn calculate(&self, amount: &Money, _ctx: &ShippingContext) -> Result<Money, PricingError> {
        Ok(self.cost_for(amount))
    }

    fn qualifies_for_free_shipping(&self, amount: &Money, _ctx: &ShippingContext) -> bool {
        meets_threshold(amount, &self.free_threshold)
    }

    fn remaining_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> Option<Money> {
        if self.qualifies_for_free_shipping(amount, ctx) {
            return None;
        }
        Some(Money::from_minor_units(
            self.free_threshold.minor_units() - amount.minor_units(),
            amount.currency(),
        ))
    }
}

// =============================================================================
// Promotional Shipping
// =============================================================================

/// Time-boxed promotion wrapping a standard calculator.
///
/// While the evaluation date falls inside `[start_date, end_date]`
/// (inclusive), the promotional threshold and cost apply; outside the
/// window every call delegates to the wrapped standard calculator.
#[derive(Debug, Clone)]
pub struct PromotionalShipping {
    promotion_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    promotional_threshold: Money,
    promotional_cost: Money,
    standard: StandardShipping,
}

impl PromotionalShipping {
    /// Creates a promotional calculator.
    ///
    /// ## Errors
    /// - `PricingError::BlankField` for a blank promotion name
    /// - `PricingError::InvalidDateRange` if `start_date > end_date`
    /// - `PricingError::NegativeAmount` for a negative promotional cost
    pub fn new(
        promotion_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        promotional_threshold: Money,
        promotional_cost: Money,
        standard: StandardShipping,
    ) -> Result<Self, PricingError> {
        if promotion_name.trim().is_empty() {
            return Err(PricingError::BlankField {
                field: "promotion name".to_string(),
            });
        }
        if start_date > end_date {
            return Err(PricingError::InvalidDateRange);
        }
        if promotional_cost.is_negative() {
            return Err(PricingError::NegativeAmount {
                field: "promotional shipping cost".to_string(),
            });
        }
        Ok(PromotionalShipping {
            promotion_name: promotion_name.to_string(),
            start_date,
            end_date,
            promotional_threshold,
            promotional_cost,
            standard,
        })
    }

    pub fn promotion_name(&self) -> &str {
        &self.promotion_name
    }

    /// Whether the promotion window covers the given date (inclusive).
    pub fn promotion_active(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// How much the promotion saves on shipping versus the standard policy.
    ///
    /// Zero when the promotion is inactive.
    pub fn shipping_discount(&self, amount: &Money, date: NaiveDate) -> Money {
        if !self.promotion_active(date) {
            return Money::zero(amount.currency());
        }
        let standard_cost = self.standard.cost_for(amount);
        let promotional_cost = self.promotional_cost_for(amount);
        Money::from_minor_units(
            standard_cost.minor_units() - promotional_cost.minor_units(),
            amount.currency(),
        )
    }

    fn promotional_cost_for(&self, amount: &Money) -> Money {
        if meets_threshold(amount, &self.promotional_threshold) {
            Money::zero(amount.currency())
        } else {
            quote_in(amount, &self.promotional_cost)
        }
    }

    // The threshold in effect for the evaluation date.
    fn active_threshold(&self, date: NaiveDate) -> &Money {
        if self.promotion_active(date) {
            &self.promotional_threshold
        } else {
            &self.standard.free_threshold
        }
    }
}

impl ShippingCalculator for PromotionalShipping {
    fn calculate(&self, amount: &Money, ctx: &ShippingContext) -> Result<Money, PricingError> {
        if self.promotion_active(ctx.date()) {
            Ok(self.promotional_cost_for(amount))
        } else {
            self.standard.calculate(amount, ctx)
        }
    }

    fn qualifies_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> bool {
        meets_threshold(amount, self.active_threshold(ctx.date()))
    }

    fn remaining_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> Option<Money> {
        let threshold = self.active_threshold(ctx.date());
        if meets_threshold(amount, threshold) {
            return None;
        }
        Some(Money::from_minor_units(
            threshold.minor_units() - amount.minor_units(),
            amount.currency(),
        ))
    }
}

// =============================================================================
// Tiered Shipping
// =============================================================================

/// One named shipping tier: its cost, optional free-shipping threshold,
/// delivery estimate, and same-day-processing cutoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingTier {
    name: String,
    cost: Money,
    /// `None` means this tier is never free, regardless of order size.
    free_threshold: Option<Money>,
    delivery_days: u32,
    /// Orders placed after this time of day lose a processing day.
    /// `None` means the tier has no cutoff.
    cutoff_time: Option<NaiveTime>,
}

impl ShippingTier {
    /// Creates a tier.
    ///
    /// ## Errors
    /// - `PricingError::BlankField` for a blank tier name
    /// - `PricingError::NegativeAmount` for a negative cost
    pub fn new(
        name: &str,
        cost: Money,
        free_threshold: Option<Money>,
        delivery_days: u32,
        cutoff_time: Option<NaiveTime>,
    ) -> Result<Self, PricingError> {
        if name.trim().is_empty() {
            return Err(PricingError::BlankField {
                field: "tier name".to_string(),
            });
        }
        if cost.is_negative() {
            return Err(PricingError::NegativeAmount {
                field: "tier cost".to_string(),
            });
        }
        Ok(ShippingTier {
            name: name.to_string(),
            cost,
            free_threshold,
            delivery_days,
            cutoff_time,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delivery_days(&self) -> u32 {
        self.delivery_days
    }

    pub fn cutoff_time(&self) -> Option<NaiveTime> {
        self.cutoff_time
    }

    /// Whether an amount earns free shipping on this tier.
    /// Tiers without a threshold are never free.
    pub fn qualifies_for_free_shipping(&self, amount: &Money) -> bool {
        match &self.free_threshold {
            Some(threshold) => meets_threshold(amount, threshold),
            None => false,
        }
    }

    /// The cost of shipping this amount on this tier.
    pub fn cost_for(&self, amount: &Money) -> Money {
        if self.qualifies_for_free_shipping(amount) {
            Money::zero(amount.currency())
        } else {
            quote_in(amount, &self.cost)
        }
    }
}

/// A per-tier quote for one order subtotal, for presenting tier options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierQuote {
    pub name: String,
    pub cost: Money,
    pub delivery_days: u32,
    pub cutoff_time: Option<NaiveTime>,
    pub free_shipping: bool,
}

/// A set of named tiers; tier selection is by explicit name lookup.
#[derive(Debug, Clone)]
pub struct TieredShipping {
    tiers: Vec<ShippingTier>,
}

fn cutoff(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid cutoff time")
}

impl TieredShipping {
    /// Creates a tiered calculator.
    ///
    /// ## Errors
    /// `PricingError::NoTiers` if the tier list is empty.
    pub fn new(tiers: Vec<ShippingTier>) -> Result<Self, PricingError> {
        if tiers.is_empty() {
            return Err(PricingError::NoTiers);
        }
        Ok(TieredShipping { tiers })
    }

    pub fn tiers(&self) -> &[ShippingTier] {
        &self.tiers
    }

    /// Quotes the cost of a named tier for an amount.
    ///
    /// ## Errors
    /// `PricingError::UnknownTier` if no tier has that exact name.
    pub fn calculate_for_tier(
        &self,
        amount: &Money,
        tier_name: &str,
    ) -> Result<Money, PricingError> {
        let tier = self.find_tier(tier_name)?;
        Ok(tier.cost_for(amount))
    }

    /// Estimates the delivery date for an order placed at `order_time`.
    ///
    /// Starts from the order date, adds the tier's delivery days, adds one
    /// extra day when the order was placed after the tier's cutoff, then
    /// advances past weekend days until landing on a weekday.
    pub fn estimated_delivery_date(
        &self,
        tier_name: &str,
        order_time: NaiveDateTime,
    ) -> Result<NaiveDate, PricingError> {
        let tier = self.find_tier(tier_name)?;

        let extra_days = match tier.cutoff_time {
            Some(tier_cutoff) if order_time.time() > tier_cutoff => 1,
            _ => 0,
        };

        let mut date =
            order_time.date() + Duration::days(i64::from(tier.delivery_days + extra_days));
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += Duration::days(1);
        }
        Ok(date)
    }

    /// Quotes every tier for an amount, in declaration order.
    pub fn available_tiers(&self, amount: &Money) -> Vec<TierQuote> {
        self.tiers
            .iter()
            .map(|tier| TierQuote {
                name: tier.name.clone(),
                cost: tier.cost_for(amount),
                delivery_days: tier.delivery_days,
                cutoff_time: tier.cutoff_time,
                free_shipping: tier.qualifies_for_free_shipping(amount),
            })
            .collect()
    }

    /// The tier with the lowest computed cost for this amount.
    /// Ties go to the earliest declared tier.
    pub fn cheapest_tier(&self, amount: &Money) -> &ShippingTier {
        self.tiers
            .iter()
            .min_by_key(|tier| tier.cost_for(amount).minor_units())
            .expect("tier list is validated non-empty")
    }

    /// The tier with the fewest delivery days.
    /// Ties go to the earliest declared tier.
    pub fn fastest_tier(&self) -> &ShippingTier {
        self.tiers
            .iter()
            .min_by_key(|tier| tier.delivery_days)
            .expect("tier list is validated non-empty")
    }

    fn find_tier(&self, tier_name: &str) -> Result<&ShippingTier, PricingError> {
        self.tiers
            .iter()
            .find(|tier| tier.name == tier_name)
            .ok_or_else(|| PricingError::UnknownTier(tier_name.to_string()))
    }
}

/// Default tier set: Standard / Express / Overnight.
impl Default for TieredShipping {
    fn default() -> Self {
        TieredShipping {
            tiers: vec![
                ShippingTier {
                    name: "Standard Shipping".to_string(),
                    cost: Money::from_minor_units(599, Currency::USD),
                    free_threshold: Some(Money::from_minor_units(5_000, Currency::USD)),
                    delivery_days: 5,
                    cutoff_time: Some(cutoff(17, 0)),
                },
                ShippingTier {
                    name: "Express Shipping".to_string(),
                    cost: Money::from_minor_units(1_299, Currency::USD),
                    free_threshold: Some(Money::from_minor_units(10_000, Currency::USD)),
                    delivery_days: 2,
                    cutoff_time: Some(cutoff(14, 0)),
                },
                ShippingTier {
                    name: "Overnight Shipping".to_string(),
                    cost: Money::from_minor_units(2_499, Currency::USD),
                    free_threshold: None, // Never free
                    delivery_days: 1,
                    cutoff_time: Some(cutoff(12, 0)),
                },
            ],
        }
    }
}

impl ShippingCalculator for TieredShipping {
    fn calculate(&self, amount: &Money, ctx: &ShippingContext) -> Result<Money, PricingError> {
        let tier_name = ctx.tier().ok_or(PricingError::MissingTier)?;
        self.calculate_for_tier(amount, tier_name)
    }

    fn qualifies_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> bool {
        match ctx.tier().and_then(|name| self.find_tier(name).ok()) {
            Some(tier) => tier.qualifies_for_free_shipping(amount),
            None => false,
        }
    }

    fn remaining_for_free_shipping(&self, amount: &Money, ctx: &ShippingContext) -> Option<Money> {
        let tier = ctx.tier().and_then(|name| self.find_tier(name).ok())?;
        let threshold = tier.free_threshold.as_ref()?;
        if meets_threshold(amount, threshold) {
            return None;
        }
        Some(Money::from_minor_units(
            threshold.minor_units() - amount.minor_units(),
            amount.currency(),
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
