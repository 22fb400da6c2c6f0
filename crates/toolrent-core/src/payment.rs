//! # Payment Collaborator
//!
//! Direct checkout hands a [`PaymentRequest`] to a payment collaborator and
//! waits for exactly one outcome: a confirmation or an error value.
//!
//! ## Error Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw error from the collaborator       Normalised failure               │
//! │  ───────────────────────────────       ──────────────────               │
//! │  {"message": "Card expired", ...}  ──► { kind: exception, detail }      │
//! │  "Declined"                        ──► { kind: message,   detail }      │
//! │  42 / null / {"code": 7}           ──► none → generic retry prompt      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::Quantity;
use crate::validation::validate_payment_amount;

/// Shown when the error payload carries nothing readable.
pub const GENERIC_FAILURE_MESSAGE: &str = "Payment failed. Please try again or add to cart.";

// =============================================================================
// Request / Confirmation
// =============================================================================

/// What the payment button is asked to charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRequest {
    pub amount: Money,
    pub tool_name: String,
    pub quantity: Quantity,
    /// Duration label ("1 Day").
    pub duration: String,
}

impl PaymentRequest {
    /// Builds a request, rejecting non-positive amounts.
    pub fn new(
        amount: Money,
        tool_name: impl Into<String>,
        quantity: Quantity,
        duration: impl Into<String>,
    ) -> CoreResult<Self> {
        validate_payment_amount(amount).map_err(|e| CoreError::InvalidPaymentAmount {
            reason: e.to_string(),
        })?;

        Ok(PaymentRequest {
            amount,
            tool_name: tool_name.into(),
            quantity,
            duration: duration.into(),
        })
    }
}

/// Success payload. Providers send more fields; only `id` is relied on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentConfirmation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PaymentConfirmation {
    pub fn new(id: impl Into<String>) -> Self {
        PaymentConfirmation {
            id: id.into(),
            status: None,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// An error value as the collaborator reported it.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentError {
    /// An error object with a message.
    Exception { message: String },
    /// A bare string.
    Message(String),
    /// Anything else; carries no readable detail.
    Opaque(Value),
}

impl PaymentError {
    /// Classifies an arbitrary JSON error payload.
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::String(s) => PaymentError::Message(s),
            Value::Object(map) => {
                let message = map.get("message").and_then(Value::as_str).map(str::to_owned);
                match message {
                    Some(message) => PaymentError::Exception { message },
                    None => PaymentError::Opaque(Value::Object(map)),
                }
            }
            other => PaymentError::Opaque(other),
        }
    }

    /// Normalises into the tagged failure shown to the renter.
    pub fn normalize(&self) -> Option<PaymentFailure> {
        match self {
            PaymentError::Exception { message } => Some(PaymentFailure {
                kind: PaymentFailureKind::Exception,
                detail: message.clone(),
            }),
            PaymentError::Message(detail) => Some(PaymentFailure {
                kind: PaymentFailureKind::Message,
                detail: detail.clone(),
            }),
            PaymentError::Opaque(_) => None,
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentError::Exception { message } => write!(f, "{}", message),
            PaymentError::Message(message) => write!(f, "{}", message),
            PaymentError::Opaque(value) => write!(f, "unrecognised payment error: {}", value),
        }
    }
}

impl std::error::Error for PaymentError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentFailureKind {
    Exception,
    Message,
}

/// `{kind: "exception"|"message", detail}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PaymentFailure {
    pub kind: PaymentFailureKind,
    pub detail: String,
}

// =============================================================================
// Outcome reported by the client
// =============================================================================

/// Outcome posted back by the browser's payment button callbacks.
///
/// ```json
/// {"status": "success", "data": {"id": "PAY123"}}
/// {"status": "error", "error": "Declined"}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PaymentOutcome {
    Success { data: PaymentConfirmation },
    Error { error: Value },
}

impl From<PaymentOutcome> for Result<PaymentConfirmation, PaymentError> {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::Success { data } => Ok(data),
            PaymentOutcome::Error { error } => Err(PaymentError::from_payload(error)),
        }
    }
}

// =============================================================================
// Collaborator
// =============================================================================

/// A payment provider.
///
/// The returned future resolves exactly once, to a confirmation or an error.
pub trait PaymentCollaborator: Send + Sync {
    fn request_payment(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentConfirmation, PaymentError>> + Send;
}

// =============================================================================
// Checkout Notice
// =============================================================================

/// What the renter is told once checkout settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "status", rename_all = "lowercase")]
#[ts(export)]
pub enum CheckoutNotice {
    #[serde(rename_all = "camelCase")]
    Success { payment_id: String, message: String },
    #[serde(rename_all = "camelCase")]
    Failure {
        failure: Option<PaymentFailure>,
        message: String,
    },
}

impl CheckoutNotice {
    /// Builds the notice for a settled payment.
    pub fn settle(
        request: &PaymentRequest,
        outcome: Result<PaymentConfirmation, PaymentError>,
    ) -> Self {
        match outcome {
            Ok(confirmation) => CheckoutNotice::Success {
                message: format!(
                    "Successfully rented {}x {} ({})! Payment ID: {}. \
                     Access details will be sent to your email.",
                    request.quantity, request.tool_name, request.duration, confirmation.id
                ),
                payment_id: confirmation.id,
            },
            Err(error) => {
                let failure = error.normalize();
                let message = match &failure {
                    Some(f) => format!("Payment failed: {}", f.detail),
                    None => GENERIC_FAILURE_MESSAGE.to_string(),
                };
                CheckoutNotice::Failure { failure, message }
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CheckoutNotice::Success { message, .. } | CheckoutNotice::Failure { message, .. } => {
                message
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutNotice::Success { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> PaymentRequest {
        PaymentRequest::new(
            Money::from_paise(226_560),
            "Adobe Photoshop",
            Quantity::new(2).unwrap(),
            "1 Day",
        )
        .unwrap()
    }

    #[test]
    fn test_request_rejects_zero_amount() {
        let err = PaymentRequest::new(Money::zero(), "Figma", Quantity::ONE, "1 Hour").unwrap_err();
        assert!(matches!(err, CoreError::InvalidPaymentAmount { .. }));
    }

    #[test]
    fn test_success_message_contains_payment_id() {
        let notice = CheckoutNotice::settle(&request(), Ok(PaymentConfirmation::new("PAY123")));
        assert!(notice.is_success());
        assert!(notice.message().contains("PAY123"));
        assert_eq!(
            notice.message(),
            "Successfully rented 2x Adobe Photoshop (1 Day)! Payment ID: PAY123. \
             Access details will be sent to your email."
        );
    }

    #[test]
    fn test_string_error_is_surfaced() {
        let notice = CheckoutNotice::settle(
            &request(),
            Err(PaymentError::from_payload(json!("Declined"))),
        );
        assert_eq!(notice.message(), "Payment failed: Declined");
        match notice {
            CheckoutNotice::Failure { failure, .. } => {
                assert_eq!(failure.unwrap().kind, PaymentFailureKind::Message);
            }
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn test_error_object_is_surfaced() {
        let error = PaymentError::from_payload(json!({"name": "Error", "message": "Card expired"}));
        assert_eq!(
            error,
            PaymentError::Exception {
                message: "Card expired".to_string()
            }
        );
        let notice = CheckoutNotice::settle(&request(), Err(error));
        assert_eq!(notice.message(), "Payment failed: Card expired");
    }

    #[test]
    fn test_unreadable_error_falls_back_to_generic() {
        for payload in [json!(42), json!(null), json!({"code": 7}), json!({"message": 7})] {
            let notice = CheckoutNotice::settle(&request(), Err(PaymentError::from_payload(payload)));
            assert_eq!(notice.message(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_client_outcome_parsing() {
        let ok: PaymentOutcome =
            serde_json::from_value(json!({"status": "success", "data": {"id": "PAY9", "payer": {}}}))
                .unwrap();
        let ok: Result<_, _> = ok.into();
        assert_eq!(ok.unwrap().id, "PAY9");

        let err: PaymentOutcome =
            serde_json::from_value(json!({"status": "error", "error": "Declined"})).unwrap();
        let err: Result<PaymentConfirmation, PaymentError> = err.into();
        assert_eq!(err.unwrap_err(), PaymentError::Message("Declined".to_string()));
    }

    #[test]
    fn test_notice_serialization() {
        let notice = CheckoutNotice::settle(&request(), Ok(PaymentConfirmation::new("PAY1")));
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["paymentId"], "PAY1");
    }
}
