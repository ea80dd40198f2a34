//! Order Errors

use salvo::http::StatusCode;

use tantika_app::domain::orders::OrdersServiceError;

use crate::envelope::ApiError;

impl From<OrdersServiceError> for ApiError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound | OrdersServiceError::ProductNotFound(_) => {
                Self::client(StatusCode::NOT_FOUND, &error)
            }
            OrdersServiceError::Forbidden => Self::client(StatusCode::FORBIDDEN, &error),
            OrdersServiceError::ProductUnavailable(_)
            | OrdersServiceError::InsufficientStock { .. }
            | OrdersServiceError::InvalidTransition(_)
            | OrdersServiceError::ClaimedByPayout
            | OrdersServiceError::ReasonRequired
            | OrdersServiceError::InvalidInput(_)
            | OrdersServiceError::AlreadyExists { .. }
            | OrdersServiceError::InvalidReference
            | OrdersServiceError::InvalidData => Self::client(StatusCode::BAD_REQUEST, &error),
            OrdersServiceError::Sql(source) => Self::internal("order storage error", source),
        }
    }
}
