//! Payouts service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{database::violated_field, domain::payouts::lifecycle::PayoutTransitionError};

#[derive(Debug, Error)]
pub enum PayoutsServiceError {
    #[error("payout not found")]
    NotFound,

    #[error("artisan not found")]
    ArtisanNotFound,

    #[error("only approved artisans can request payouts")]
    NotApproved,

    #[error("bank details must be complete and verified before requesting a payout")]
    BankDetailsUnverified,

    #[error("minimum payout amount is {minimum} paise")]
    BelowMinimum { minimum: u64 },

    #[error("requested amount exceeds the available balance of {available} paise")]
    InsufficientBalance { available: u64 },

    #[error(
        "requested amount must be made of whole order lines; the closest payable amount is {claimable} paise"
    )]
    AmountNotClaimable { claimable: u64 },

    #[error(transparent)]
    InvalidTransition(#[from] PayoutTransitionError),

    #[error("a failure reason is required")]
    ReasonRequired,

    #[error("you do not have access to this payout")]
    Forbidden,

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("{field} is already in use")]
    AlreadyExists { field: String },

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PayoutsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error
            .as_database_error()
            .map(|db| (db.kind(), violated_field(db)))
        {
            Some((ErrorKind::UniqueViolation, field)) => Self::AlreadyExists { field },
            Some((ErrorKind::ForeignKeyViolation, _)) => Self::InvalidReference,
            Some((ErrorKind::NotNullViolation | ErrorKind::CheckViolation, _)) => {
                Self::InvalidData
            }
            Some((ErrorKind::Other | _, _)) | None => Self::Sql(error),
        }
    }
}
