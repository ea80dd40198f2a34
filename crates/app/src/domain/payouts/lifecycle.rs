//! Payout processing workflow.
//!
//! ```text
//! pending ──► processing ──► processed
//!    │            │
//!    ├──► failed ◄┘
//!    └──► cancelled
//! ```
//!
//! `failed` and `cancelled` give the claimed order lines back to the
//! artisan's available balance.

use thiserror::Error;

use crate::domain::payouts::records::PayoutStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayoutTransitionError {
    #[error("payout is already {0}")]
    Unchanged(PayoutStatus),

    #[error("payout cannot move from {from} to {to}")]
    NotAllowed { from: PayoutStatus, to: PayoutStatus },
}

impl PayoutStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Failed | Self::Cancelled)
    }

    /// Claimed order lines return to the balance when a payout ends here.
    #[must_use]
    pub const fn releases_lines(self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled)
    }

    pub fn can_move_to(self, next: Self) -> Result<(), PayoutTransitionError> {
        if self == next {
            return Err(PayoutTransitionError::Unchanged(self));
        }

        match (self, next) {
            (Self::Pending, Self::Processing | Self::Cancelled | Self::Failed)
            | (Self::Processing, Self::Processed | Self::Failed) => Ok(()),
            (from, to) => Err(PayoutTransitionError::NotAllowed { from, to }),
        }
    }
}
