//! Remove From Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiMessage},
    extensions::*,
    state::State,
};

/// Remove From Wishlist Handler
#[endpoint(
    tags("account"),
    summary = "Remove From Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the wishlist"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state
        .app
        .wishlists
        .remove(actor, product.into_inner().into())
        .await?;

    Ok(ApiMessage::new("Removed from wishlist"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::wishlists::WishlistsServiceError;

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, customer},
    };

    use super::*;

    #[tokio::test]
    async fn test_unsaved_product_returns_404() -> TestResult {
        let mut app = MockApp::new();

        app.wishlists
            .expect_remove()
            .once()
            .return_once(|_, _| Err(WishlistsServiceError::NotFound));

        let mut res = TestClient::delete(format!(
            "http://example.com/usernorms/wishlist/{}",
            Uuid::now_v7()
        ))
        .send(&app.service(
            Some(customer()),
            Router::with_path("usernorms/wishlist/{product}").delete(handler),
        ))
        .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "Product is not in the wishlist");

        Ok(())
    }
}
