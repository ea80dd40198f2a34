//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiMessage},
    extensions::*,
    state::State,
};

/// Delete Product Handler
///
/// Removes the product from the catalogue. Past orders keep their snapshot.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
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
        .products
        .delete_product(actor, product.into_inner().into())
        .await?;

    Ok(ApiMessage::new("Product deleted"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{MockApp, admin};

    use super::*;

    fn route() -> Router {
        Router::with_path("products/{product}").delete(handler)
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let actor = admin();
        let uuid = ProductUuid::new();
        let mut app = MockApp::new();

        app.products
            .expect_delete_product()
            .once()
            .withf(move |caller, product| *caller == actor && *product == uuid)
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&app.service(Some(actor), route()))
            .await;

        let body: ApiMessage = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Product deleted");

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_product_returns_404() -> TestResult {
        let mut app = MockApp::new();

        app.products
            .expect_delete_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/products/{}", Uuid::now_v7()))
            .send(&app.service(Some(admin()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
