//! Wishlists service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::database::violated_field;

#[derive(Debug, Error)]
pub enum WishlistsServiceError {
    #[error("product is not in the wishlist")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("{field} is already in the wishlist")]
    AlreadyExists { field: String },

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for WishlistsServiceError {
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
