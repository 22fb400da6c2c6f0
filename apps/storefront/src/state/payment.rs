//! # Sandbox Payment Gateway
//!
//! A stand-in payment provider for the direct checkout path. It never talks
//! to a network: the configured [`PaymentMode`] and amount limit decide the
//! outcome.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PaymentRequest ──► mode == decline? ──► Err("Payment declined ...")   │
//! │                          │ no                                          │
//! │                          ▼                                             │
//! │                     amount > limit? ───► Err({message: "... limit"})   │
//! │                          │ no                                          │
//! │                          ▼                                             │
//! │                     Ok({id: "PAY-…", status: "COMPLETED"})             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use toolrent_core::payment::PaymentRequest;
use toolrent_core::{Money, PaymentCollaborator, PaymentConfirmation, PaymentError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{PaymentMode, PaymentSection};

pub const DECLINED_MESSAGE: &str = "Payment declined by the sandbox gateway";

#[derive(Debug, Clone, Default)]
pub struct SandboxGateway {
    mode: PaymentMode,
    limit: Option<Money>,
}

impl SandboxGateway {
    pub fn new(mode: PaymentMode, limit: Option<Money>) -> Self {
        SandboxGateway { mode, limit }
    }

    pub fn from_config(section: &PaymentSection) -> Self {
        SandboxGateway::new(section.mode, section.limit_paise.map(Money::from_paise))
    }

    fn decide(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, PaymentError> {
        if self.mode == PaymentMode::Decline {
            return Err(PaymentError::Message(DECLINED_MESSAGE.to_string()));
        }

        if let Some(limit) = self.limit {
            if request.amount > limit {
                return Err(PaymentError::Exception {
                    message: format!(
                        "Amount {} exceeds the sandbox limit of {}",
                        request.amount, limit
                    ),
                });
            }
        }

        Ok(PaymentConfirmation {
            id: payment_id(),
            status: Some("COMPLETED".to_string()),
        })
    }
}

/// "PAY-" followed by 12 uppercase hex digits.
fn payment_id() -> String {
    let simple = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("PAY-{}", &simple[..12])
}

impl PaymentCollaborator for SandboxGateway {
    fn request_payment(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentConfirmation, PaymentError>> + Send {
        let outcome = self.decide(request);
        match &outcome {
            Ok(confirmation) => info!(
                payment_id = %confirmation.id,
                amount = %request.amount,
                tool = %request.tool_name,
                "Sandbox payment approved"
            ),
            Err(error) => warn!(amount = %request.amount, %error, "Sandbox payment declined"),
        }
        async move { outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolrent_core::Quantity;

    fn request(paise: i64) -> PaymentRequest {
        PaymentRequest::new(Money::from_paise(paise), "Figma Pro", Quantity::ONE, "1 Hour").unwrap()
    }

    #[tokio::test]
    async fn test_approves_by_default() {
        let gateway = SandboxGateway::default();
        let confirmation = gateway.request_payment(&request(5_900)).await.unwrap();
        assert!(confirmation.id.starts_with("PAY-"));
        assert_eq!(confirmation.id.len(), 16);
        assert_eq!(confirmation.status.as_deref(), Some("COMPLETED"));
    }

    #[tokio::test]
    async fn test_decline_mode() {
        let gateway = SandboxGateway::new(PaymentMode::Decline, None);
        let err = gateway.request_payment(&request(5_900)).await.unwrap_err();
        assert_eq!(err, PaymentError::Message(DECLINED_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_limit() {
        let gateway = SandboxGateway::new(PaymentMode::Approve, Some(Money::from_rupees(100)));
        assert!(gateway.request_payment(&request(10_000)).await.is_ok());

        let err = gateway.request_payment(&request(10_001)).await.unwrap_err();
        assert!(matches!(err, PaymentError::Exception { .. }));
        assert!(err.to_string().contains("₹100.00"));
    }

    #[test]
    fn test_from_config() {
        let section = PaymentSection {
            mode: PaymentMode::Approve,
            limit_paise: Some(500_000),
        };
        let gateway = SandboxGateway::from_config(&section);
        assert_eq!(gateway.limit, Some(Money::from_rupees(5_000)));
    }
}
