//! Users service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{auth::PasswordError, database::violated_field};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("address not found")]
    AddressNotFound,

    #[error("{field} is already in use")]
    AlreadyExists { field: String },

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("you cannot change your own account this way")]
    SelfModification,

    #[error("the last active admin cannot be removed or demoted")]
    LastAdmin,

    #[error("user has orders and cannot be deleted")]
    HasOrders,

    #[error("user owns an artisan profile and cannot be deleted")]
    HasArtisanProfile,

    #[error("artisan roles are managed through artisan review")]
    ReservedRole,

    #[error("artisan accounts are suspended and reactivated through artisan review")]
    ArtisanActivation,

    #[error("only a super admin can grant or revoke admin roles")]
    RequiresSuperAdmin,

    #[error("current password is incorrect")]
    IncorrectPassword,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
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
