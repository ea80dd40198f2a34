//! Payouts Data

use crate::domain::{
    optional_text,
    payouts::{errors::PayoutsServiceError, records::PayoutStatus},
};

/// An admin's processing decision on a payout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutStatusUpdate {
    pub status: PayoutStatus,
    pub transaction_reference: Option<String>,
    pub failure_reason: Option<String>,
}

impl PayoutStatusUpdate {
    /// Processed payouts carry the bank reference; failed ones say why.
    pub(crate) fn validated(self) -> Result<Self, PayoutsServiceError> {
        let transaction_reference = optional_text(self.transaction_reference.as_deref());
        let failure_reason = optional_text(self.failure_reason.as_deref());

        match self.status {
            PayoutStatus::Processed if transaction_reference.is_none() => Err(
                PayoutsServiceError::InvalidInput("a transaction reference is required"),
            ),
            PayoutStatus::Failed if failure_reason.is_none() => {
                Err(PayoutsServiceError::ReasonRequired)
            }
            status => Ok(Self {
                status,
                transaction_reference,
                failure_reason: failure_reason.filter(|_| status == PayoutStatus::Failed),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayoutFilter {
    pub status: Option<PayoutStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(status: PayoutStatus) -> PayoutStatusUpdate {
        PayoutStatusUpdate {
            status,
            transaction_reference: None,
            failure_reason: None,
        }
    }

    #[test]
    fn processed_needs_a_reference() {
        assert!(matches!(
            update(PayoutStatus::Processed).validated(),
            Err(PayoutsServiceError::InvalidInput(_))
        ));

        let processed = PayoutStatusUpdate {
            transaction_reference: Some(" UTR0042 ".to_string()),
            ..update(PayoutStatus::Processed)
        }
        .validated();

        assert_eq!(
            processed.ok().and_then(|update| update.transaction_reference),
            Some("UTR0042".to_string())
        );
    }

    #[test]
    fn failed_needs_a_reason() {
        assert!(matches!(
            update(PayoutStatus::Failed).validated(),
            Err(PayoutsServiceError::ReasonRequired)
        ));
    }

    #[test]
    fn failure_reason_is_dropped_unless_failed() {
        let processing = PayoutStatusUpdate {
            failure_reason: Some("ignored".to_string()),
            ..update(PayoutStatus::Processing)
        }
        .validated();

        assert_eq!(
            processing.ok().and_then(|update| update.failure_reason),
            None
        );
    }
}
