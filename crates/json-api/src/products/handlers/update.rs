//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::products::data::ProductUpdate;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    products::ProductResponse,
    state::State,
};

/// Update Product Request; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,

    /// Price in paise
    pub price: Option<u64>,

    pub stock: Option<u64>,
    pub images: Option<Vec<String>>,
    pub draft: Option<bool>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            category: request.category,
            price: request.price,
            stock: request.stock,
            images: request.images,
            draft: request.draft,
        }
    }
}

/// Update Product Handler
///
/// Changing anything a reviewer signed off on sends an artisan's product
/// back for review. Stock changes do not.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let product = state
        .app
        .products
        .update_product(actor, product.into_inner().into(), json.into_inner().into())
        .await?;

    Ok(Json(
        ApiResponse::new(ProductResponse::from(product)).message("Product updated"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::{
        artisans::records::ArtisanUuid,
        products::{ProductsServiceError, records::ProductUuid},
    };

    use crate::test_helpers::{MockApp, artisan, make_product};

    use super::*;

    fn route() -> Router {
        Router::with_path("products/{product}").put(handler)
    }

    #[tokio::test]
    async fn test_partial_update_only_sets_given_fields() -> TestResult {
        let owner = artisan();
        let uuid = ProductUuid::new();
        let mut app = MockApp::new();

        app.products
            .expect_update_product()
            .once()
            .withf(move |actor, product, update| {
                *actor == owner
                    && *product == uuid
                    && *update
                        == ProductUpdate {
                            stock: Some(3),
                            ..ProductUpdate::default()
                        }
            })
            .return_once(move |_, _, _| {
                let mut product = make_product(uuid, ArtisanUuid::new());
                product.stock = 3;
                Ok(product)
            });

        let body: ApiResponse<ProductResponse> =
            TestClient::put(format!("http://example.com/products/{uuid}"))
                .json(&json!({ "stock": 3 }))
                .send(&app.service(Some(owner), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.stock, 3);
        assert_eq!(body.message.as_deref(), Some("Product updated"));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_artisans_get_403() -> TestResult {
        let mut app = MockApp::new();

        app.products
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .json(&json!({ "price": 1_000 }))
            .send(&app.service(Some(artisan()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
