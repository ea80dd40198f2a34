//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    products::ProductResponse,
    state::State,
};

/// Get Product Handler
///
/// Anyone may view a listed product. Drafts and products awaiting review are
/// visible to their owner and to admins.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "The product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(depot.actor(), product.into_inner().into())
        .await?;

    Ok(ok(product.into()))
}
