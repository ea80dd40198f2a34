//! Cancel Order Handler

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

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    orders::OrderResponse,
    state::State,
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CancelOrderRequest {
    pub reason: String,
}

/// Cancel Order Handler
///
/// Customers may cancel their own orders until they are confirmed. Admins
/// may cancel anything short of shipped.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order can no longer be cancelled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not your order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.cancel",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CancelOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .cancel_order(actor, order.into(), json.into_inner().reason)
        .await?;

    Ok(Json(
        ApiResponse::new(OrderResponse::from(order)).message("Order cancelled"),
    ))
}
