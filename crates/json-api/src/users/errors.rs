//! User Errors

use salvo::http::StatusCode;

use tantika_app::{auth::PasswordError, domain::users::UsersServiceError};

use crate::envelope::ApiError;

impl From<UsersServiceError> for ApiError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::NotFound | UsersServiceError::AddressNotFound => {
                Self::client(StatusCode::NOT_FOUND, &error)
            }
            UsersServiceError::RequiresSuperAdmin => Self::client(StatusCode::FORBIDDEN, &error),
            UsersServiceError::Password(PasswordError::TooShort) => {
                Self::client(StatusCode::BAD_REQUEST, &PasswordError::TooShort)
            }
            UsersServiceError::Password(source) => {
                Self::internal("failed to hash password", source)
            }
            UsersServiceError::Sql(source) => Self::internal("user storage error", source),
            UsersServiceError::AlreadyExists { .. }
            | UsersServiceError::InvalidInput(_)
            | UsersServiceError::InvalidReference
            | UsersServiceError::InvalidData
            | UsersServiceError::SelfModification
            | UsersServiceError::LastAdmin
            | UsersServiceError::HasOrders
            | UsersServiceError::HasArtisanProfile
            | UsersServiceError::ReservedRole
            | UsersServiceError::ArtisanActivation
            | UsersServiceError::IncorrectPassword => Self::client(StatusCode::BAD_REQUEST, &error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_violations_are_bad_requests() {
        for (error, message) in [
            (
                UsersServiceError::LastAdmin,
                "The last active admin cannot be removed or demoted",
            ),
            (
                UsersServiceError::HasOrders,
                "User has orders and cannot be deleted",
            ),
            (
                UsersServiceError::SelfModification,
                "You cannot change your own account this way",
            ),
        ] {
            let error = ApiError::from(error);

            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error.message(), message);
        }
    }

    #[test]
    fn admin_grants_need_a_super_admin() {
        assert_eq!(
            ApiError::from(UsersServiceError::RequiresSuperAdmin).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn short_passwords_are_bad_requests() {
        let error = ApiError::from(UsersServiceError::Password(PasswordError::TooShort));

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.message().starts_with("Password must be at least"));
    }
}
