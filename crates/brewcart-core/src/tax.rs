//! # Tax Calculators
//!
//! Pluggable tax-rate strategies, evaluated in exact `Money` arithmetic.
//!
//! ## Strategy Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      TaxCalculator (trait)                              │
//! │                                                                         │
//! │   FlatTaxCalculator            RegionalTaxCalculator                    │
//! │   ─────────────────            ─────────────────────                    │
//! │   single rate in [0,1]         rate resolved from state/country         │
//! │                                tables with a fallback, plus             │
//! │                                region exemptions (composes a            │
//! │                                FlatTaxCalculator, no inheritance)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::PricingError;
use crate::money::Money;

/// Default tax rate applied when nothing region-specific is configured (9%).
pub const DEFAULT_TAX_RATE: f64 = 0.09;

// =============================================================================
// TaxCalculator Trait
// =============================================================================

/// Capability shared by every tax strategy.
///
/// `calculate` always returns a value in the amount's own currency, so
/// the provided combinators never hit a currency mismatch.
pub trait TaxCalculator {
    /// Calculates the tax owed on an amount.
    fn calculate(&self, amount: &Money) -> Money;

    /// The effective tax rate as a fraction (0.0725 for 7.25%).
    fn rate(&self) -> f64;

    /// Calculates the total including tax.
    fn calculate_total(&self, amount: &Money) -> Money {
        let tax = self.calculate(amount);
        // Tax is computed in the amount's currency, so the sum is exact
        Money::from_minor_units(amount.minor_units() + tax.minor_units(), amount.currency())
    }

    /// The rate as a percentage, for display (7.25 for 7.25%).
    fn percentage(&self) -> f64 {
        self.rate() * 100.0
    }

    /// Human-readable name for receipts and invoices.
    fn tax_name(&self) -> String {
        "Sales Tax".to_string()
    }
}

// =============================================================================
// Flat Tax
// =============================================================================

/// A single flat rate applied to every amount.
#[derive(Debug, Clone, Copy)]
pub struct FlatTaxCalculator {
    rate: f64,
}

impl FlatTaxCalculator {
    /// Creates a flat tax calculator.
    ///
    /// ## Errors
    /// `PricingError::InvalidTaxRate` unless `rate` is in `[0, 1]`.
    pub fn new(rate: f64) -> Result<Self, PricingError> {
        if !(0.0..=1.0).contains(&rate) || rate.is_nan() {
            return Err(PricingError::InvalidTaxRate(rate));
        }
        Ok(FlatTaxCalculator { rate })
    }
}

impl Default for FlatTaxCalculator {
    fn default() -> Self {
        FlatTaxCalculator {
            rate: DEFAULT_TAX_RATE,
        }
    }
}

impl TaxCalculator for FlatTaxCalculator {
    fn calculate(&self, amount: &Money) -> Money {
        amount.multiply(self.rate)
    }

    fn rate(&self) -> f64 {
        self.rate
    }
}

// =============================================================================
// Regional Tax
// =============================================================================

/// Whether a region code names a US state or a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    State,
    Country,
}

/// Sales tax rates by US state. Not exhaustive; unknown states use the
/// caller-supplied fallback rate.
const STATE_TAX_RATES: &[(&str, f64)] = &[
    ("AL", 0.04),    // Alabama
    ("AK", 0.00),    // Alaska (no state sales tax)
    ("AZ", 0.056),   // Arizona
    ("CA", 0.0725),  // California
    ("CO", 0.029),   // Colorado
    ("FL", 0.06),    // Florida
    ("GA", 0.04),    // Georgia
    ("IL", 0.0625),  // Illinois
    ("IN", 0.07),    // Indiana
    ("MA", 0.0625),  // Massachusetts
    ("MI", 0.06),    // Michigan
    ("MN", 0.06875), // Minnesota
    ("NY", 0.04),    // New York
    ("NC", 0.0475),  // North Carolina
    ("OH", 0.0575),  // Ohio
    ("PA", 0.06),    // Pennsylvania
    ("TX", 0.0625),  // Texas
    ("VA", 0.053),   // Virginia
    ("WA", 0.065),   // Washington
];

/// Simplified tax rates by country.
const COUNTRY_TAX_RATES: &[(&str, f64)] = &[
    ("US", 0.09), // Default US rate
    ("CA", 0.05), // Canada GST (simplified)
    ("GB", 0.20), // UK VAT
    ("DE", 0.19), // Germany VAT
    ("FR", 0.20), // France VAT
    ("AU", 0.10), // Australia GST
    ("JP", 0.10), // Japan consumption tax
    ("BR", 0.17), // Brazil (simplified)
];

/// Tax strategy whose rate is selected by state/country lookup,
/// with region-specific exemptions.
#[derive(Debug, Clone)]
pub struct RegionalTaxCalculator {
    region: String,
    kind: RegionKind,
    flat: FlatTaxCalculator,
}

impl RegionalTaxCalculator {
    /// Creates a regional calculator for a state or country code.
    ///
    /// The region code is case-normalized to uppercase. Unknown regions
    /// fall back to `fallback_rate`, which must itself be a valid rate.
    ///
    /// ## Example
    /// ```rust
    /// use brewcart_core::money::{Currency, Money};
    /// use brewcart_core::tax::{RegionKind, RegionalTaxCalculator, TaxCalculator};
    ///
    /// let ca = RegionalTaxCalculator::new("ca", RegionKind::State, 0.09).unwrap();
    /// let tax = ca.calculate(&Money::from_minor_units(10_000, Currency::USD));
    /// assert_eq!(tax.minor_units(), 725); // 7.25%
    /// ```
    pub fn new(region: &str, kind: RegionKind, fallback_rate: f64) -> Result<Self, PricingError> {
        let region = region.trim().to_uppercase();
        let table = match kind {
            RegionKind::State => STATE_TAX_RATES,
            RegionKind::Country => COUNTRY_TAX_RATES,
        };
        let rate = table
            .iter()
            .find(|(code, _)| *code == region)
            .map(|(_, rate)| *rate)
            .unwrap_or(fallback_rate);
        let flat = FlatTaxCalculator::new(rate)?;
        Ok(RegionalTaxCalculator { region, kind, flat })
    }

    /// The region code this calculator was configured with.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Whether the region is fully exempt from sales tax.
    ///
    /// Currently: Alaska levies no state sales tax.
    pub fn is_exempt(&self) -> bool {
        self.kind == RegionKind::State && self.region == "AK"
    }
}

impl TaxCalculator for RegionalTaxCalculator {
    fn calculate(&self, amount: &Money) -> Money {
        if self.is_exempt() {
            return Money::zero(amount.currency());
        }
        self.flat.calculate(amount)
    }

    fn rate(&self) -> f64 {
        self.flat.rate()
    }

    fn tax_name(&self) -> String {
        match self.kind {
            RegionKind::State => format!("{} State Sales Tax", self.region),
            RegionKind::Country => match self.region.as_str() {
                "GB" | "DE" | "FR" => "VAT".to_string(),
                "CA" | "AU" => "GST".to_string(),
                "JP" => "Consumption Tax".to_string(),
                _ => "Sales Tax".to_string(),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(minor: i64) -> Money {
        Money::from_minor_units(minor, Currency::USD)
    }

    #[test]
    fn test_flat_rate_validation() {
        assert!(FlatTaxCalculator::new(0.0).is_ok());
        assert!(FlatTaxCalculator::new(1.0).is_ok());
        assert!(matches!(
            FlatTaxCalculator::new(-0.01),
            Err(PricingError::InvalidTaxRate(_))
        ));
        assert!(matches!(
            FlatTaxCalculator::new(1.5),
            Err(PricingError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn test_flat_calculate_and_total() {
        let calc = FlatTaxCalculator::new(0.09).unwrap();
        let amount = usd(10_000); // $100.00

        assert_eq!(calc.calculate(&amount).minor_units(), 900);
        assert_eq!(calc.calculate_total(&amount).minor_units(), 10_900);
        assert!((calc.percentage() - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flat_default_rate() {
        let calc = FlatTaxCalculator::default();
        assert!((calc.rate() - DEFAULT_TAX_RATE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_regional_state_lookup() {
        let ca = RegionalTaxCalculator::new("CA", RegionKind::State, DEFAULT_TAX_RATE).unwrap();
        // $100.00 at 7.25% = $7.25
        assert_eq!(ca.calculate(&usd(10_000)).minor_units(), 725);
    }

    #[test]
    fn test_regional_exempt_state_pays_no_tax() {
        let ak = RegionalTaxCalculator::new("AK", RegionKind::State, DEFAULT_TAX_RATE).unwrap();
        assert!(ak.is_exempt());
        assert_eq!(ak.calculate(&usd(10_000)).minor_units(), 0);
    }

    #[test]
    fn test_regional_unknown_region_uses_fallback() {
        let unknown =
            RegionalTaxCalculator::new("ZZ", RegionKind::State, 0.05).unwrap();
        assert_eq!(unknown.calculate(&usd(10_000)).minor_units(), 500);
    }

    #[test]
    fn test_regional_invalid_fallback_rejected() {
        assert!(matches!(
            RegionalTaxCalculator::new("ZZ", RegionKind::State, 2.0),
            Err(PricingError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn test_regional_country_lookup() {
        let uk = RegionalTaxCalculator::new("gb", RegionKind::Country, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(uk.calculate(&usd(10_000)).minor_units(), 2_000);
    }

    #[test]
    fn test_tax_names() {
        let ny = RegionalTaxCalculator::new("ny", RegionKind::State, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(ny.tax_name(), "NY State Sales Tax");

        let de = RegionalTaxCalculator::new("DE", RegionKind::Country, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(de.tax_name(), "VAT");

        let au = RegionalTaxCalculator::new("AU", RegionKind::Country, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(au.tax_name(), "GST");

        let jp = RegionalTaxCalculator::new("JP", RegionKind::Country, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(jp.tax_name(), "Consumption Tax");

        let br = RegionalTaxCalculator::new("BR", RegionKind::Country, DEFAULT_TAX_RATE).unwrap();
        assert_eq!(br.tax_name(), "Sales Tax");
    }

    #[test]
    fn test_tax_preserves_currency() {
        let calc = FlatTaxCalculator::new(0.2).unwrap();
        let amount = Money::from_minor_units(5_000, Currency::EUR);
        assert_eq!(calc.calculate(&amount).currency(), Currency::EUR);
    }
}
