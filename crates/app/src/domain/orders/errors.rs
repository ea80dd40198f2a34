//! Orders service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{
    database::violated_field,
    domain::{orders::lifecycle::OrderTransitionError, products::records::ProductUuid},
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("product {0} is not available for sale")]
    ProductUnavailable(ProductUuid),

    #[error("insufficient stock for product {product}: {available} available")]
    InsufficientStock { product: ProductUuid, available: u64 },

    #[error(transparent)]
    InvalidTransition(#[from] OrderTransitionError),

    #[error("order lines have already been claimed by a payout")]
    ClaimedByPayout,

    #[error("a reason is required to cancel an order")]
    ReasonRequired,

    #[error("you do not have access to this order")]
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

impl From<Error> for OrdersServiceError {
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
