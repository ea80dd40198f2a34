//! Auth service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{
    auth::{PasswordError, SessionTokenError},
    database::violated_field,
    domain::{artisans::ArtisansServiceError, users::UsersServiceError},
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account is deactivated")]
    Inactive,

    #[error("authentication required")]
    Unauthenticated,

    #[error("user not found")]
    NotFound,

    #[error("{field} is already registered")]
    AlreadyExists { field: String },

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error
            .as_database_error()
            .map(|db| (db.kind(), violated_field(db)))
        {
            Some((ErrorKind::UniqueViolation, field)) => Self::AlreadyExists { field },
            Some((ErrorKind::Other | _, _)) | None => Self::Sql(error),
        }
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(_: SessionTokenError) -> Self {
        Self::Unauthenticated
    }
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::InvalidInput(message) => Self::InvalidInput(message),
            UsersServiceError::AlreadyExists { field } => Self::AlreadyExists { field },
            UsersServiceError::Password(error) => Self::Password(error),
            UsersServiceError::Sql(error) => Self::Sql(error),
            _ => Self::InvalidInput("account details are invalid"),
        }
    }
}

impl From<ArtisansServiceError> for AuthServiceError {
    fn from(error: ArtisansServiceError) -> Self {
        match error {
            ArtisansServiceError::InvalidInput(message) => Self::InvalidInput(message),
            ArtisansServiceError::Sql(error) => Self::Sql(error),
            _ => Self::InvalidInput("artisan profile is invalid"),
        }
    }
}
