//! Wishlist Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    account::models::WishlistResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Wishlist Handler
///
/// Most recently added first.
#[endpoint(
    tags("account"),
    summary = "My Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Saved products"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<WishlistResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let items = state.app.wishlists.list(actor).await?;

    Ok(ok(items.into()))
}
