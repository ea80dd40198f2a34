//! Payout Errors

use salvo::http::StatusCode;

use tantika_app::domain::payouts::PayoutsServiceError;

use crate::envelope::ApiError;

impl From<PayoutsServiceError> for ApiError {
    fn from(error: PayoutsServiceError) -> Self {
        match error {
            PayoutsServiceError::NotFound | PayoutsServiceError::ArtisanNotFound => {
                Self::client(StatusCode::NOT_FOUND, &error)
            }
            PayoutsServiceError::Forbidden | PayoutsServiceError::NotApproved => {
                Self::client(StatusCode::FORBIDDEN, &error)
            }
            PayoutsServiceError::BankDetailsUnverified
            | PayoutsServiceError::BelowMinimum { .. }
            | PayoutsServiceError::InsufficientBalance { .. }
            | PayoutsServiceError::AmountNotClaimable { .. }
            | PayoutsServiceError::InvalidTransition(_)
            | PayoutsServiceError::ReasonRequired
            | PayoutsServiceError::InvalidInput(_)
            | PayoutsServiceError::AlreadyExists { .. }
            | PayoutsServiceError::InvalidReference
            | PayoutsServiceError::InvalidData => Self::client(StatusCode::BAD_REQUEST, &error),
            PayoutsServiceError::Sql(source) => Self::internal("payout storage error", source),
        }
    }
}
