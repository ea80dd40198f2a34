//! Artisan review lifecycle.
//!
//! ```text
//!            approve              suspend
//! pending ───────────► approved ◄──────────► suspended
//!    │                  ▲    │    reactivate     │
//!    │ reject   approve │    │ reject            │ reject
//!    ▼                  │    ▼                   │
//! rejected ─────────────┘  rejected ◄────────────┘
//! ```
//!
//! Approve is valid from any status but approved, reject from any status
//! but rejected. Suspension only applies to approved artisans.

use std::fmt;

use thiserror::Error;

use crate::domain::{artisans::records::ArtisanStatus, users::records::UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtisanAction {
    Approve,
    Reject,
    Suspend,
    Reactivate,
}

impl ArtisanAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Suspend => "suspend",
            Self::Reactivate => "reactivate",
        }
    }

    /// Actions that must carry a reason.
    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::Reject | Self::Suspend)
    }
}

impl fmt::Display for ArtisanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArtisanTransitionError {
    #[error("artisan is already approved")]
    AlreadyApproved,

    #[error("artisan is already rejected")]
    AlreadyRejected,

    #[error("artisan is already suspended")]
    AlreadySuspended,

    #[error("an artisan cannot be returned to pending review")]
    BackToPending,

    #[error("cannot {action} an artisan that is {from}")]
    NotAllowed {
        from: ArtisanStatus,
        action: ArtisanAction,
    },
}

impl ArtisanStatus {
    /// The status an action leads to from this one.
    pub fn apply(self, action: ArtisanAction) -> Result<Self, ArtisanTransitionError> {
        use ArtisanAction::{Approve, Reactivate, Reject, Suspend};

        match (self, action) {
            (Self::Approved, Approve) => Err(ArtisanTransitionError::AlreadyApproved),
            (Self::Rejected, Reject) => Err(ArtisanTransitionError::AlreadyRejected),
            (_, Approve) | (Self::Suspended, Reactivate) => Ok(Self::Approved),
            (_, Reject) => Ok(Self::Rejected),
            (Self::Approved, Suspend) => Ok(Self::Suspended),
            (Self::Suspended, Suspend) => Err(ArtisanTransitionError::AlreadySuspended),
            (from, action) => Err(ArtisanTransitionError::NotAllowed { from, action }),
        }
    }

    /// The action that moves this status to `target`, for edits that set a status directly.
    pub fn action_towards(self, target: Self) -> Result<ArtisanAction, ArtisanTransitionError> {
        let action = match target {
            Self::Approved if self == Self::Suspended => ArtisanAction::Reactivate,
            Self::Approved => ArtisanAction::Approve,
            Self::Rejected => ArtisanAction::Reject,
            Self::Suspended => ArtisanAction::Suspend,
            Self::Pending => return Err(ArtisanTransitionError::BackToPending),
        };

        self.apply(action).map(|_| action)
    }

    /// Role and activation the owning user account must carry in this status.
    #[must_use]
    pub const fn mirrored_user_state(self) -> (UserRole, bool) {
        match self {
            Self::Pending => (UserRole::PendingArtisan, true),
            Self::Approved => (UserRole::Artisan, true),
            Self::Rejected => (UserRole::User, true),
            Self::Suspended => (UserRole::Artisan, false),
        }
    }
}
