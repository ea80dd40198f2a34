//! Payout fee derivation, in paise.

use crate::domain::orders::pricing::percent_of;

pub const PROCESSING_FEE_PERCENT: u64 = 2;

/// GST charged on the processing fee.
pub const FEE_GST_PERCENT: u64 = 18;

/// Smallest payout an artisan may request unless configured otherwise (₹500).
pub const DEFAULT_MIN_PAYOUT: u64 = 50_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayoutFees {
    pub processing_fee: u64,
    pub gst: u64,
    pub net_amount: u64,
}

impl PayoutFees {
    /// Fees for settling `amount`. `None` if the fees would exceed it.
    #[must_use]
    pub fn for_amount(amount: u64) -> Option<Self> {
        let processing_fee = percent_of(amount, PROCESSING_FEE_PERCENT)?;
        let gst = percent_of(processing_fee, FEE_GST_PERCENT)?;

        Some(Self {
            processing_fee,
            gst,
            net_amount: amount.checked_sub(processing_fee)?.checked_sub(gst)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_payout_fees() {
        assert_eq!(
            PayoutFees::for_amount(DEFAULT_MIN_PAYOUT),
            Some(PayoutFees {
                processing_fee: 1_000,
                gst: 180,
                net_amount: 48_820,
            })
        );
    }

    #[test]
    fn fees_round_half_up() {
        // 2% of ₹12.75 is 25.5 paise; 18% of 26 paise is 4.68 paise.
        assert_eq!(
            PayoutFees::for_amount(1_275),
            Some(PayoutFees {
                processing_fee: 26,
                gst: 5,
                net_amount: 1_244,
            })
        );
    }

    #[test]
    fn net_amount_balances() {
        for amount in [50_000, 70_800, 123_457, 9_999_999] {
            let fees = PayoutFees::for_amount(amount);

            assert_eq!(
                fees.map(|fees| fees.net_amount + fees.processing_fee + fees.gst),
                Some(amount)
            );
        }
    }
}
