//! Review Product Handler

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

use tantika_app::domain::products::data::ProductReview;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    products::ProductResponse,
    state::State,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReviewAction {
    Approve,
    Reject,
}

/// Review Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewProductRequest {
    pub action: ReviewAction,

    /// Required when rejecting
    pub reason: Option<String>,
}

impl From<ReviewProductRequest> for ProductReview {
    fn from(request: ReviewProductRequest) -> Self {
        match request.action {
            ReviewAction::Approve => ProductReview::Approve,
            ReviewAction::Reject => ProductReview::Reject {
                reason: request.reason.unwrap_or_default(),
            },
        }
    }
}

/// Review Product Handler
#[endpoint(
    tags("products"),
    summary = "Review Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Review recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Rejection without a reason"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "products.review",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ReviewProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let product = state
        .app
        .products
        .review_product(admin, product.into(), json.into_inner().into())
        .await?;

    let message = format!("Product {}", product.approval_status);

    Ok(Json(
        ApiResponse::new(ProductResponse::from(product)).message(message),
    ))
}
