//! Update Order Status Handler

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

use tantika_app::domain::orders::data::StatusUpdate;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    orders::OrderResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// The next fulfilment status
    pub status: String,

    /// Required when cancelling
    #[serde(default)]
    pub reason: Option<String>,
}

impl TryFrom<UpdateStatusRequest> for StatusUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateStatusRequest) -> Result<Self, Self::Error> {
        Ok(StatusUpdate {
            status: request.status.trim().parse()?,
            reason: request.reason,
        })
    }
}

/// Update Order Status Handler
///
/// Orders only move forward. Cancelling restores stock.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let update = StatusUpdate::try_from(json.into_inner())?;

    let order = state
        .app
        .orders
        .update_order_status(admin, order.into(), update)
        .await?;

    let message = format!("Order status updated to {}", order.status);

    Ok(Json(ApiResponse::new(OrderResponse::from(order)).message(message)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::orders::{
        OrdersServiceError,
        lifecycle::OrderTransitionError,
        records::{OrderStatus, OrderUuid},
    };

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, admin, make_order},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/orders/{order}/status").put(handler)
    }

    #[tokio::test]
    async fn test_moves_the_order_forward() -> TestResult {
        let uuid = OrderUuid::new();
        let mut app = MockApp::new();

        app.orders
            .expect_update_order_status()
            .once()
            .withf(move |_, order, update| {
                *order == uuid && update.status == OrderStatus::Shipped && update.reason.is_none()
            })
            .return_once(move |_, _, _| {
                let mut order = make_order(uuid);
                order.status = OrderStatus::Shipped;
                Ok(order)
            });

        let body: ApiResponse<OrderResponse> =
            TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
                .json(&json!({ "status": "shipped" }))
                .send(&app.service(Some(admin()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.status, "shipped");
        assert_eq!(body.message.as_deref(), Some("Order status updated to shipped"));

        Ok(())
    }

    #[tokio::test]
    async fn test_backwards_move_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| {
                Err(OrdersServiceError::InvalidTransition(
                    OrderTransitionError::Backwards {
                        from: OrderStatus::Delivered,
                        to: OrderStatus::Pending,
                    },
                ))
            });

        let mut res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "pending" }))
        .send(&app.service(Some(admin()), route()))
        .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Order cannot move back from delivered to pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancelling_without_reason_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.orders
            .expect_update_order_status()
            .once()
            .withf(|_, _, update| update.status == OrderStatus::Cancelled)
            .return_once(|_, _, _| Err(OrdersServiceError::ReasonRequired));

        let mut res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "cancelled" }))
        .send(&app.service(Some(admin()), route()))
        .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "A reason is required to cancel an order");

        Ok(())
    }
}
