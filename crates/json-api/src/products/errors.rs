//! Product Errors

use salvo::http::StatusCode;

use tantika_app::domain::products::ProductsServiceError;

use crate::envelope::ApiError;

impl From<ProductsServiceError> for ApiError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound | ProductsServiceError::ArtisanNotFound => {
                Self::client(StatusCode::NOT_FOUND, &error)
            }
            ProductsServiceError::ArtisanNotApproved | ProductsServiceError::Forbidden => {
                Self::client(StatusCode::FORBIDDEN, &error)
            }
            ProductsServiceError::ArtisanRequired
            | ProductsServiceError::ReasonRequired
            | ProductsServiceError::InvalidInput(_)
            | ProductsServiceError::AlreadyExists { .. }
            | ProductsServiceError::InvalidReference
            | ProductsServiceError::InvalidData => Self::client(StatusCode::BAD_REQUEST, &error),
            ProductsServiceError::Sql(source) => Self::internal("product storage error", source),
        }
    }
}
