//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::{artisans::records::ArtisanUuid, products::data::NewProduct};

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    products::ProductResponse,
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Owning artisan; admins only. Artisans always create for themselves.
    pub artisan_uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category: String,

    /// Price in paise
    pub price: u64,

    pub stock: u64,

    #[serde(default)]
    pub images: Vec<String>,

    /// Keep the product out of the catalogue until published
    #[serde(default)]
    pub draft: bool,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            artisan: request.artisan_uuid.map(ArtisanUuid::from_uuid),
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

/// Create Product Handler
///
/// Artisan products wait for review; admin products are approved at once.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisan is not approved to sell"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let product = state
        .app
        .products
        .create_product(actor, json.into_inner().into())
        .await?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(ProductResponse::from(product)).message("Product created"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::products::{
        ProductsServiceError,
        records::{ApprovalStatus, ProductUuid},
    };

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, artisan, make_product, pending_artisan},
    };

    use super::*;

    fn body() -> serde_json::Value {
        json!({
            "name": "Ikat stole",
            "category": "Textiles",
            "price": 60_000,
            "stock": 10,
            "images": ["https://img.tantika.in/ikat-stole.jpg"],
        })
    }

    #[tokio::test]
    async fn test_artisan_creates_a_product_for_review() -> TestResult {
        let seller = artisan();
        let uuid = ProductUuid::new();
        let mut app = MockApp::new();

        app.products
            .expect_create_product()
            .once()
            .withf(move |actor, new| {
                *actor == seller
                    && new.artisan.is_none()
                    && new.name == "Ikat stole"
                    && new.price == 60_000
                    && !new.draft
            })
            .return_once(move |actor, _| {
                let mut product = make_product(uuid, actor.artisan.unwrap_or_default());
                product.approval_status = ApprovalStatus::Pending;
                Ok(product)
            });

        let mut res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&app.service(Some(seller), Router::with_path("products").post(handler)))
            .await;

        let body: ApiResponse<ProductResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/products/{uuid}").as_str()));
        assert_eq!(body.data.approval_status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_unapproved_artisan_returns_403() -> TestResult {
        let mut app = MockApp::new();

        app.products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::ArtisanNotApproved));

        let mut res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&app.service(
                Some(pending_artisan()),
                Router::with_path("products").post(handler),
            ))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.error, "Artisan is not approved to sell");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_price_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Ikat stole", "category": "Textiles", "stock": 1 }))
            .send(&app.service(Some(artisan()), Router::with_path("products").post(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
