//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Every amount is a whole number of cents plus an ISO currency code.   │
//! │    Decimal inputs are rounded half-up ONCE, at the construction         │
//! │    boundary, and all arithmetic after that is exact.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewcart_core::money::{Currency, Money};
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor_units(1099, Currency::USD); // $10.99
//!
//! // Or from a decimal amount (rounds half-up at construction)
//! let rounded = Money::from_decimal(10.556, Currency::USD);
//! assert_eq!(rounded.minor_units(), 1056);
//!
//! // Same-currency arithmetic is exact; cross-currency arithmetic fails
//! let total = price.add(&Money::from_minor_units(500, Currency::USD)).unwrap();
//! assert_eq!(total.to_string(), "$15.99");
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MoneyError;

// =============================================================================
// Currency
// =============================================================================

/// An ISO 4217 currency code, stored as three uppercase ASCII letters.
///
/// ## Design Decisions
/// - **`[u8; 3]` payload**: keeps `Currency` (and therefore `Money`) `Copy`
/// - **Uppercased on construction**: `"usd"` and `"USD"` are the same currency
/// - **Open set**: any three-letter code is representable; only the symbol
///   lookup knows about specific currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    pub const USD: Currency = Currency(*b"USD");
    pub const EUR: Currency = Currency(*b"EUR");
    pub const GBP: Currency = Currency(*b"GBP");
    pub const JPY: Currency = Currency(*b"JPY");
    pub const BRL: Currency = Currency(*b"BRL");

    /// Parses a currency code, normalizing case.
    ///
    /// ## Example
    /// ```rust
    /// use brewcart_core::money::Currency;
    ///
    /// assert_eq!(Currency::from_code("usd").unwrap(), Currency::USD);
    /// assert!(Currency::from_code("DOLLARS").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Self, MoneyError> {
        let code = code.trim();
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }
        Ok(Currency([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Returns the three-letter code.
    pub fn code(&self) -> &str {
        // Bytes are validated ASCII letters on construction
        std::str::from_utf8(&self.0).expect("currency code is ASCII")
    }

    /// Returns the display symbol for this currency.
    ///
    /// Unknown currencies fall back to the code itself as the prefix,
    /// so `Money` can always be formatted.
    pub fn symbol(&self) -> &str {
        match &self.0 {
            b"USD" => "$",
            b"EUR" => "\u{20ac}",
            b"GBP" => "\u{a3}",
            b"JPY" => "\u{a5}",
            b"BRL" => "R$",
            _ => self.code(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::from_code(&code).map_err(D::Error::custom)
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary value: integer minor units ("cents") plus a currency.
///
/// ## Design Decisions
/// - **i64 minor units (signed)**: allows negative values for refunds, discounts
/// - **Currency carried on the value**: mixing currencies is a typed error,
///   not a silent wrong answer
/// - **Immutable**: every operation returns a new `Money`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor_units: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from minor units (cents for USD).
    ///
    /// ## Example
    /// ```rust
    /// use brewcart_core::money::{Currency, Money};
    ///
    /// let price = Money::from_minor_units(1099, Currency::USD); // $10.99
    /// assert_eq!(price.minor_units(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor_units(minor_units: i64, currency: Currency) -> Self {
        Money {
            minor_units,
            currency,
        }
    }

    /// Creates a Money value from a decimal amount in the major unit.
    ///
    /// Rounds half-up (away from zero) to the nearest minor unit. This is
    /// the ONLY place a float touches a monetary value; everything after
    /// construction is integer arithmetic.
    ///
    /// ## Example
    /// ```rust
    /// use brewcart_core::money::{Currency, Money};
    ///
    /// assert_eq!(Money::from_decimal(10.556, Currency::USD).minor_units(), 1056);
    /// assert_eq!(Money::from_decimal(5.99, Currency::USD).minor_units(), 599);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Money {
            minor_units: (amount * 100.0).round() as i64,
            currency,
        }
    }

    /// Returns zero in the given currency.
    #[inline]
    pub const fn zero(currency: Currency) -> Self {
        Money {
            minor_units: 0,
            currency,
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Returns the currency of this value.
    #[inline]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount in the major unit, for display and metadata only.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.minor_units as f64 / 100.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.minor_units > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Adds two same-currency values.
    ///
    /// ## Errors
    /// `MoneyError::CurrencyMismatch` if the currencies differ.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Money::from_minor_units(
            self.minor_units + other.minor_units,
            self.currency,
        ))
    }

    /// Subtracts a same-currency value.
    ///
    /// ## Errors
    /// `MoneyError::CurrencyMismatch` if the currencies differ.
    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Money::from_minor_units(
            self.minor_units - other.minor_units,
            self.currency,
        ))
    }

    /// Multiplies by a scalar, rounding half-up to the nearest minor unit.
    ///
    /// Used for rate application: `subtotal.multiply(0.0725)` is 7.25% tax.
    ///
    /// ## Example
    /// ```rust
    /// use brewcart_core::money::{Currency, Money};
    ///
    /// let subtotal = Money::from_minor_units(10_000, Currency::USD); // $100.00
    /// assert_eq!(subtotal.multiply(0.0725).minor_units(), 725);      // $7.25
    /// ```
    pub fn multiply(&self, factor: f64) -> Money {
        Money::from_minor_units(
            (self.minor_units as f64 * factor).round() as i64,
            self.currency,
        )
    }

    /// Divides by a scalar, rounding half-up to the nearest minor unit.
    ///
    /// ## Errors
    /// `MoneyError::DivisionByZero` if the divisor is zero.
    pub fn divide(&self, divisor: f64) -> Result<Money, MoneyError> {
        if divisor == 0.0 {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Money::from_minor_units(
            (self.minor_units as f64 / divisor).round() as i64,
            self.currency,
        ))
    }

    /// Converts to another currency at the given rate.
    ///
    /// This is the explicit conversion entry point, so there is no
    /// mismatch check: the result is a new value in the target currency.
    ///
    /// ## Example
    /// ```rust
    /// use brewcart_core::money::{Currency, Money};
    ///
    /// let dollars = Money::from_minor_units(1000, Currency::USD);
    /// let euros = dollars.convert(Currency::EUR, 0.92);
    /// assert_eq!(euros.minor_units(), 920);
    /// assert_eq!(euros.currency(), Currency::EUR);
    /// ```
    pub fn convert(&self, target: Currency, rate: f64) -> Money {
        Money::from_minor_units((self.minor_units as f64 * rate).round() as i64, target)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency.code().to_string(),
                right: other.currency.code().to_string(),
            })
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Ordering is only defined within a single currency.
///
/// Comparing `$10.00` against `€10.00` yields `None` rather than a silently
/// wrong answer; same-currency comparisons are exact integer comparisons on
/// minor units.
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            Some(self.minor_units.cmp(&other.minor_units))
        } else {
            None
        }
    }
}

/// Formats as `<symbol><sign><grouped-integer>.<2-digit-fraction>`.
///
/// Negative amounts place the sign after the symbol: `$-12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            self.currency.symbol(),
            sign,
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

/// Inserts a comma delimiter every three digits: `1234567` -> `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_code_normalizes_case() {
        assert_eq!(Currency::from_code("usd").unwrap(), Currency::USD);
        assert_eq!(Currency::from_code(" eur ").unwrap(), Currency::EUR);
        assert_eq!(Currency::from_code("CHF").unwrap().code(), "CHF");
    }

    #[test]
    fn test_currency_from_code_rejects_bad_codes() {
        assert!(matches!(
            Currency::from_code("DOLLARS"),
            Err(MoneyError::InvalidCurrency(_))
        ));
        assert!(matches!(
            Currency::from_code("U$"),
            Err(MoneyError::InvalidCurrency(_))
        ));
        assert!(matches!(
            Currency::from_code(""),
            Err(MoneyError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_from_decimal_rounds_half_up() {
        assert_eq!(Money::from_decimal(10.556, Currency::USD).minor_units(), 1056);
        assert_eq!(Money::from_decimal(10.554, Currency::USD).minor_units(), 1055);
        assert_eq!(Money::from_decimal(49.99, Currency::USD).minor_units(), 4999);
        // Negative amounts round away from zero symmetrically
        assert_eq!(Money::from_decimal(-10.556, Currency::USD).minor_units(), -1056);
    }

    #[test]
    fn test_add_and_subtract_round_trip() {
        let a = Money::from_minor_units(1998, Currency::USD);
        let b = Money::from_minor_units(599, Currency::USD);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.minor_units(), 2597);
        assert_eq!(sum.currency(), Currency::USD);

        // (a + b) - b == a
        assert_eq!(sum.subtract(&b).unwrap(), a);
    }

    #[test]
    fn test_cross_currency_arithmetic_fails() {
        let dollars = Money::from_minor_units(1000, Currency::USD);
        let euros = Money::from_minor_units(1000, Currency::EUR);

        assert!(matches!(
            dollars.add(&euros),
            Err(MoneyError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            dollars.subtract(&euros),
            Err(MoneyError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_multiply_rounds_half_up() {
        let amount = Money::from_minor_units(10_000, Currency::USD);
        assert_eq!(amount.multiply(0.0725).minor_units(), 725);

        // $10.00 * 8.25% = $0.825 -> rounds up to $0.83
        let small = Money::from_minor_units(1000, Currency::USD);
        assert_eq!(small.multiply(0.0825).minor_units(), 83);
    }

    #[test]
    fn test_divide() {
        let amount = Money::from_minor_units(1000, Currency::USD);
        assert_eq!(amount.divide(3.0).unwrap().minor_units(), 333);
        assert!(matches!(
            amount.divide(0.0),
            Err(MoneyError::DivisionByZero)
        ));
    }

    #[test]
    fn test_convert_changes_currency_without_mismatch_check() {
        let dollars = Money::from_minor_units(1000, Currency::USD);
        let yen = dollars.convert(Currency::JPY, 147.32);
        assert_eq!(yen.minor_units(), 147_320);
        assert_eq!(yen.currency(), Currency::JPY);
    }

    #[test]
    fn test_equality_requires_amount_and_currency() {
        let a = Money::from_minor_units(1000, Currency::USD);
        let b = Money::from_minor_units(1000, Currency::USD);
        let c = Money::from_minor_units(1000, Currency::EUR);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ordering_within_one_currency_only() {
        let small = Money::from_minor_units(500, Currency::USD);
        let large = Money::from_minor_units(1000, Currency::USD);
        let euros = Money::from_minor_units(750, Currency::EUR);

        assert!(small < large);
        assert!(large >= small);
        assert_eq!(small.partial_cmp(&euros), None);
    }

    #[test]
    fn test_display_formats_with_symbol_and_grouping() {
        assert_eq!(
            Money::from_minor_units(1099, Currency::USD).to_string(),
            "$10.99"
        );
        assert_eq!(
            Money::from_minor_units(123_456_789, Currency::USD).to_string(),
            "$1,234,567.89"
        );
        assert_eq!(
            Money::from_minor_units(500, Currency::EUR).to_string(),
            "\u{20ac}5.00"
        );
        assert_eq!(
            Money::from_minor_units(1234, Currency::BRL).to_string(),
            "R$12.34"
        );
    }

    #[test]
    fn test_display_negative_puts_sign_after_symbol() {
        assert_eq!(
            Money::from_minor_units(-1234, Currency::USD).to_string(),
            "$-12.34"
        );
    }

    #[test]
    fn test_display_unknown_currency_uses_code_prefix() {
        let francs = Money::from_minor_units(1234, Currency::from_code("CHF").unwrap());
        assert_eq!(francs.to_string(), "CHF12.34");
    }

    #[test]
    fn test_zero_and_sign_checks() {
        let zero = Money::zero(Currency::USD);
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        assert!(Money::from_minor_units(1, Currency::USD).is_positive());
        assert!(Money::from_minor_units(-1, Currency::USD).is_negative());
    }
}
