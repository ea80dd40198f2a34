//! Product Categories Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    products::models::CategoryResponse,
    state::State,
};

/// Product Categories Handler
///
/// Categories of listed products with how many products each holds.
#[endpoint(tags("products"), summary = "List Categories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state.app.products.categories().await?;

    Ok(ok(categories.into_iter().map(Into::into).collect()))
}
