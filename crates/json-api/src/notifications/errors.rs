//! Notification Errors

use salvo::http::StatusCode;

use tantika_app::domain::notifications::NotificationsServiceError;

use crate::envelope::ApiError;

impl From<NotificationsServiceError> for ApiError {
    fn from(error: NotificationsServiceError) -> Self {
        match error {
            NotificationsServiceError::NotFound => Self::client(StatusCode::NOT_FOUND, &error),
            NotificationsServiceError::Sql(source) => {
                Self::internal("notification storage error", source)
            }
        }
    }
}
