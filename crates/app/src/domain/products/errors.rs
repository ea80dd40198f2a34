//! Products service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::database::violated_field;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("artisan not found")]
    ArtisanNotFound,

    #[error("an artisan is required")]
    ArtisanRequired,

    #[error("artisan is not approved to sell")]
    ArtisanNotApproved,

    #[error("you do not own this product")]
    Forbidden,

    #[error("a reason is required to reject a product")]
    ReasonRequired,

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

impl From<Error> for ProductsServiceError {
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
