//! # Payment Gateway Contract
//!
//! The abstraction every payment adapter implements, plus the immutable
//! result record adapters produce.
//!
//! ## Contract Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  charge / refund return Result<PaymentResult, GatewayError>            │
//! │                                                                         │
//! │  PaymentResult (Ok)        business outcome: approved OR declined,     │
//! │                            with a message the caller can show          │
//! │                                                                         │
//! │  GatewayError (Err)        structural problem: non-positive amount,    │
//! │                            adapter blew up. Raised before or instead   │
//! │                            of any business outcome                     │
//! │                                                                         │
//! │  Every adapter MUST reject non-positive amounts via validate_amount    │
//! │  BEFORE any gateway-specific logic runs.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use brewcart_core::Money;

// =============================================================================
// Inputs
// =============================================================================

/// Card details as captured at checkout. Opaque to the core: no field is
/// validated for format beyond presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Transaction metadata identifying the order being settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeMetadata {
    pub order_id: String,
    pub items_count: usize,
}

// =============================================================================
// Payment Result
// =============================================================================

/// Immutable outcome of a charge or refund attempt.
///
/// Produced exclusively by `PaymentGateway` implementations; no setters,
/// construct-and-freeze only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    success: bool,
    transaction_id: Option<String>,
    message: String,
    metadata: Map<String, Value>,
}

impl PaymentResult {
    /// An approved payment carrying the gateway's transaction id.
    pub fn approved(transaction_id: &str, message: &str) -> Self {
        PaymentResult {
            success: true,
            transaction_id: Some(transaction_id.to_string()),
            message: message.to_string(),
            metadata: Map::new(),
        }
    }

    /// A rejected payment with a caller-displayable message.
    pub fn declined(message: &str) -> Self {
        PaymentResult {
            success: false,
            transaction_id: None,
            message: message.to_string(),
            metadata: Map::new(),
        }
    }

    /// Attaches one metadata entry; consumed at construction time only.
    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn failure(&self) -> bool {
        !self.success
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message, but only for failures.
    pub fn error_message(&self) -> Option<&str> {
        if self.failure() {
            Some(&self.message)
        } else {
            None
        }
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

// =============================================================================
// Gateway Error
// =============================================================================

/// Structural gateway failures, never business-level rejections.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Charges and refunds must be for a positive amount.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    /// The adapter failed outright (network, protocol, panic-equivalent).
    /// The checkout service converts this into a failed result, exactly
    /// like a returned declined payment.
    #[error("Payment gateway failure: {0}")]
    Adapter(String),
}

/// Guard every adapter calls before any gateway-specific logic.
pub fn validate_amount(amount: &Money) -> Result<(), GatewayError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(GatewayError::NonPositiveAmount(*amount))
    }
}

// =============================================================================
// PaymentGateway Trait
// =============================================================================

/// Abstraction over a payment processor.
///
/// The real adapter wraps a network integration; the crate ships a mock for
/// tests and default wiring. Both obey the same contract.
pub trait PaymentGateway {
    /// Attempts to charge the given amount.
    fn charge(
        &self,
        amount: &Money,
        payment_details: &PaymentDetails,
        metadata: &ChargeMetadata,
    ) -> Result<PaymentResult, GatewayError>;

    /// Attempts to refund a previous transaction.
    fn refund(&self, transaction_id: &str, amount: &Money) -> Result<PaymentResult, GatewayError>;

    /// Whether the gateway is ready to process payments.
    fn available(&self) -> bool;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use brewcart_core::Currency;
    use serde_json::json;

    #[test]
    fn test_approved_result() {
        let result = PaymentResult::approved("txn_123", "Payment approved");
        assert!(result.success());
        assert!(!result.failure());
        assert_eq!(result.transaction_id(), Some("txn_123"));
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn test_declined_result() {
        let result = PaymentResult::declined("Card declined - insufficient funds");
        assert!(result.failure());
        assert_eq!(result.transaction_id(), None);
        assert_eq!(
            result.error_message(),
            Some("Card declined - insufficient funds")
        );
    }

    #[test]
    fn test_metadata_bag() {
        let result = PaymentResult::approved("txn_1", "ok")
            .with_metadata("amount", json!(31.98))
            .with_metadata("card_last_four", json!("1111"));

        assert_eq!(result.metadata().get("amount"), Some(&json!(31.98)));
        assert_eq!(result.metadata().get("card_last_four"), Some(&json!("1111")));
    }

    #[test]
    fn test_validate_amount_rejects_non_positive() {
        assert!(validate_amount(&Money::from_minor_units(1, Currency::USD)).is_ok());
        assert!(matches!(
            validate_amount(&Money::zero(Currency::USD)),
            Err(GatewayError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            validate_amount(&Money::from_minor_units(-100, Currency::USD)),
            Err(GatewayError::NonPositiveAmount(_))
        ));
    }
}
