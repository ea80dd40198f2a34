//! Report Errors

use salvo::http::StatusCode;

use tantika_app::domain::reports::ReportsServiceError;

use crate::envelope::ApiError;

impl From<ReportsServiceError> for ApiError {
    fn from(error: ReportsServiceError) -> Self {
        match error {
            ReportsServiceError::NotFound => Self::client(StatusCode::NOT_FOUND, &error),
            ReportsServiceError::Forbidden => Self::client(StatusCode::FORBIDDEN, &error),
            ReportsServiceError::Sql(source) => Self::internal("report storage error", source),
        }
    }
}
