//! Artisans service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{
    database::violated_field,
    domain::artisans::{
        lifecycle::{ArtisanAction, ArtisanTransitionError},
        records::ArtisanStatus,
    },
};

#[derive(Debug, Error)]
pub enum ArtisansServiceError {
    #[error("artisan not found")]
    NotFound,

    #[error("artisan is already approved")]
    AlreadyApproved,

    #[error("artisan is already rejected")]
    AlreadyRejected,

    #[error("artisan is already suspended")]
    AlreadySuspended,

    #[error("cannot {action} an artisan that is {from}")]
    InvalidTransition {
        from: ArtisanStatus,
        action: ArtisanAction,
    },

    #[error("an artisan cannot be returned to pending review")]
    BackToPending,

    #[error("a reason is required to {0} an artisan")]
    ReasonRequired(ArtisanAction),

    #[error("bank details are incomplete")]
    BankDetailsIncomplete,

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

impl From<ArtisanTransitionError> for ArtisansServiceError {
    fn from(error: ArtisanTransitionError) -> Self {
        match error {
            ArtisanTransitionError::AlreadyApproved => Self::AlreadyApproved,
            ArtisanTransitionError::AlreadyRejected => Self::AlreadyRejected,
            ArtisanTransitionError::AlreadySuspended => Self::AlreadySuspended,
            ArtisanTransitionError::BackToPending => Self::BackToPending,
            ArtisanTransitionError::NotAllowed { from, action } => {
                Self::InvalidTransition { from, action }
            }
        }
    }
}

impl From<Error> for ArtisansServiceError {
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
