//! Wishlist Errors

use salvo::http::StatusCode;

use tantika_app::domain::wishlists::WishlistsServiceError;

use crate::envelope::ApiError;

impl From<WishlistsServiceError> for ApiError {
    fn from(error: WishlistsServiceError) -> Self {
        match error {
            WishlistsServiceError::NotFound | WishlistsServiceError::ProductNotFound => {
                Self::client(StatusCode::NOT_FOUND, &error)
            }
            WishlistsServiceError::AlreadyExists { .. } => {
                Self::bad_request("Product is already in the wishlist")
            }
            WishlistsServiceError::InvalidReference | WishlistsServiceError::InvalidData => {
                Self::client(StatusCode::BAD_REQUEST, &error)
            }
            WishlistsServiceError::Sql(source) => Self::internal("wishlist storage error", source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_bad_requests() {
        let error = ApiError::from(WishlistsServiceError::AlreadyExists {
            field: "product".to_string(),
        });

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Product is already in the wishlist");
    }

    #[test]
    fn hidden_products_are_not_found() {
        assert_eq!(
            ApiError::from(WishlistsServiceError::ProductNotFound).status(),
            StatusCode::NOT_FOUND
        );
    }
}
