//! Update Payment Status Handler

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

use tantika_app::domain::orders::records::PaymentStatus;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    orders::OrderResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePaymentRequest {
    /// `pending`, `processing`, `paid`, `failed` or `refunded`
    pub payment_status: String,
}

/// Update Payment Status Handler
#[endpoint(
    tags("admin"),
    summary = "Update Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_payment",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdatePaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let payment_status: PaymentStatus = json.into_inner().payment_status.trim().parse()?;

    let order = state
        .app
        .orders
        .update_payment_status(admin, order.into(), payment_status)
        .await?;

    Ok(Json(
        ApiResponse::new(OrderResponse::from(order)).message("Payment status updated"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::orders::records::OrderUuid;

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, admin, make_order},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/orders/{order}/payment").put(handler)
    }

    #[tokio::test]
    async fn test_marks_the_order_paid() -> TestResult {
        let uuid = OrderUuid::new();
        let mut app = MockApp::new();

        app.orders
            .expect_update_payment_status()
            .once()
            .withf(move |_, order, status| *order == uuid && *status == PaymentStatus::Paid)
            .return_once(move |_, _, status| {
                let mut order = make_order(uuid);
                order.payment_status = status;
                Ok(order)
            });

        let body: ApiResponse<OrderResponse> =
            TestClient::put(format!("http://example.com/admin/orders/{uuid}/payment"))
                .json(&json!({ "payment_status": "paid" }))
                .send(&app.service(Some(admin()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.payment_status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_payment_status_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.orders.expect_update_payment_status().never();

        let mut res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/payment",
            Uuid::now_v7()
        ))
        .json(&json!({ "payment_status": "owed" }))
        .send(&app.service(Some(admin()), route()))
        .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "unknown payment status `owed`");

        Ok(())
    }
}
