//! Order status workflow.
//!
//! ```text
//! pending → contacted → confirmed → processing → shipped → delivered
//!    └──────────── any non-terminal state may be cancelled ───────────┘
//! ```
//!
//! Updates move forward and may skip steps. `delivered` and `cancelled`
//! end the workflow for status updates; only an admin may cancel a
//! delivered order.

use thiserror::Error;

use crate::domain::orders::records::OrderStatus;

/// Who is asking to cancel an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canceller {
    Customer,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderTransitionError {
    #[error("order is already {0}")]
    Unchanged(OrderStatus),

    #[error("order is {0} and can no longer change status")]
    Terminal(OrderStatus),

    #[error("order cannot move back from {from} to {to}")]
    Backwards { from: OrderStatus, to: OrderStatus },

    #[error("order is {0} and can no longer be cancelled")]
    NotCancellable(OrderStatus),
}

impl OrderStatus {
    /// Position along the fulfilment path; `None` for `cancelled`.
    const fn step(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Contacted => Some(1),
            Self::Confirmed => Some(2),
            Self::Processing => Some(3),
            Self::Shipped => Some(4),
            Self::Delivered => Some(5),
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Check a fulfilment update. Cancelling goes through [`OrderStatus::cancel_by`].
    pub fn can_advance_to(self, next: Self) -> Result<(), OrderTransitionError> {
        if self.is_terminal() {
            return Err(OrderTransitionError::Terminal(self));
        }

        if self == next {
            return Err(OrderTransitionError::Unchanged(self));
        }

        match (self.step(), next.step()) {
            (Some(from), Some(to)) if to > from => Ok(()),
            _ => Err(OrderTransitionError::Backwards {
                from: self,
                to: next,
            }),
        }
    }

    pub fn cancel_by(self, canceller: Canceller) -> Result<(), OrderTransitionError> {
        match (canceller, self) {
            (_, Self::Cancelled) => Err(OrderTransitionError::Unchanged(self)),
            (Canceller::Admin, _) | (Canceller::Customer, Self::Pending | Self::Confirmed) => {
                Ok(())
            }
            (Canceller::Customer, _) => Err(OrderTransitionError::NotCancellable(self)),
        }
    }
}
