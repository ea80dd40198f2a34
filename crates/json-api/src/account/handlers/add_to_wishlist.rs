//! Add To Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    account::models::{AddToWishlistRequest, WishlistItemResponse},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Add To Wishlist Handler
#[endpoint(
    tags("account"),
    summary = "Add To Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already saved"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToWishlistRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<WishlistItemResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let item = state
        .app
        .wishlists
        .add(actor, json.into_inner().product_uuid.into())
        .await?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(WishlistItemResponse::from(item)).message("Added to wishlist"),
    ))
}
