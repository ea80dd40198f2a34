//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    orders::OrderResponse,
    state::State,
};

/// Get Order Handler
///
/// Customers may only open their own orders; artisans see their own lines.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not your order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .get_order(actor, order.into_inner().into())
        .await?;

    Ok(ok(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, customer, make_order},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}").get(handler)
    }

    #[tokio::test]
    async fn test_returns_the_order_with_history() -> TestResult {
        let buyer = customer();
        let uuid = OrderUuid::new();
        let mut app = MockApp::new();

        app.orders
            .expect_get_order()
            .once()
            .withf(move |actor, order| *actor == buyer && *order == uuid)
            .return_once(move |_, _| Ok(make_order(uuid)));

        let body: ApiResponse<OrderResponse> =
            TestClient::get(format!("http://example.com/orders/{uuid}"))
                .send(&app.service(Some(buyer), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.uuid, uuid.into_uuid());
        assert_eq!(body.data.status_history.len(), 1);
        assert_eq!(body.data.status_history[0].status, "pending");
        assert_eq!(body.data.shipping.country, "India");

        Ok(())
    }

    #[tokio::test]
    async fn test_someone_elses_order_returns_403() -> TestResult {
        let mut app = MockApp::new();

        app.orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Forbidden));

        let mut res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&app.service(Some(customer()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.error, "You do not have access to this order");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let mut app = MockApp::new();

        app.orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&app.service(Some(customer()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
