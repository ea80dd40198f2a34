//! Auth Errors

use tantika_app::auth::{AuthServiceError, PasswordError};

use crate::envelope::ApiError;

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::InvalidCredentials => Self::unauthorized("Invalid email or password"),
            AuthServiceError::Inactive => Self::forbidden("Account is deactivated"),
            AuthServiceError::Unauthenticated => Self::unauthorized("Session expired or invalid"),
            AuthServiceError::NotFound => Self::not_found("User not found"),
            AuthServiceError::AlreadyExists { field } => {
                Self::bad_request(format!("{field} is already registered"))
            }
            AuthServiceError::InvalidInput(message) => Self::bad_request(message),
            AuthServiceError::Password(PasswordError::TooShort) => {
                Self::bad_request(PasswordError::TooShort.to_string())
            }
            AuthServiceError::Password(source) => Self::internal("failed to hash password", source),
            AuthServiceError::Sql(source) => Self::internal("auth storage error", source),
        }
    }
}
