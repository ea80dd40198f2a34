//! Artisan Errors

use salvo::http::StatusCode;

use tantika_app::domain::artisans::ArtisansServiceError;

use crate::envelope::ApiError;

impl From<ArtisansServiceError> for ApiError {
    fn from(error: ArtisansServiceError) -> Self {
        match error {
            ArtisansServiceError::NotFound => Self::client(StatusCode::NOT_FOUND, &error),
            ArtisansServiceError::AlreadyApproved
            | ArtisansServiceError::AlreadyRejected
            | ArtisansServiceError::AlreadySuspended
            | ArtisansServiceError::InvalidTransition { .. }
            | ArtisansServiceError::BackToPending
            | ArtisansServiceError::ReasonRequired(_)
            | ArtisansServiceError::BankDetailsIncomplete
            | ArtisansServiceError::InvalidInput(_)
            | ArtisansServiceError::AlreadyExists { .. }
            | ArtisansServiceError::InvalidReference
            | ArtisansServiceError::InvalidData => Self::client(StatusCode::BAD_REQUEST, &error),
            ArtisansServiceError::Sql(source) => Self::internal("artisan storage error", source),
        }
    }
}
