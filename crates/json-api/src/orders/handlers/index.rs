//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use tantika_app::domain::orders::{
    data::OrderFilter,
    records::{OrderStatus, PaymentStatus},
};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    orders::OrderResponse,
    state::State,
};

/// Order Index Handler
///
/// Admins see every order. Artisans see orders that contain their products,
/// trimmed to their own lines. Customers see the orders they placed.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    payment_status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<OrderResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let filter = OrderFilter {
        status: parse_optional::<OrderStatus>(status)?,
        payment_status: parse_optional::<PaymentStatus>(payment_status)?,
        search: search.into_inner(),
    };

    let orders = state
        .app
        .orders
        .list_orders(actor, filter, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(orders)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::{domain::orders::records::OrderUuid, pagination::Paginated};

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, admin, artisan, make_order},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").get(handler)
    }

    #[tokio::test]
    async fn test_filters_reach_the_service() -> TestResult {
        let reviewer = admin();
        let mut app = MockApp::new();

        app.orders
            .expect_list_orders()
            .once()
            .withf(move |actor, filter, page| {
                *actor == reviewer
                    && filter.status == Some(OrderStatus::Shipped)
                    && filter.payment_status == Some(PaymentStatus::Paid)
                    && filter.search.as_deref() == Some("meera")
                    && page.page() == 2
            })
            .return_once(|_, _, page| {
                let mut order = make_order(OrderUuid::new());
                order.status = OrderStatus::Shipped;
                Ok(Paginated::new(vec![order], 21, page))
            });

        let body: ApiResponse<PageResponse<OrderResponse>> = TestClient::get(
            "http://example.com/orders?status=shipped&payment_status=paid&search=meera&page=2",
        )
        .send(&app.service(Some(reviewer), route()))
        .await
        .take_json()
        .await?;

        assert_eq!(body.data.items.len(), 1);
        assert_eq!(body.data.items[0].status, "shipped");
        assert_eq!(body.data.total, 21);

        Ok(())
    }

    #[tokio::test]
    async fn test_artisans_list_through_their_own_scope() -> TestResult {
        let seller = artisan();
        let mut app = MockApp::new();

        app.orders
            .expect_list_orders()
            .once()
            .withf(move |actor, _, _| *actor == seller)
            .return_once(|_, _, page| Ok(Paginated::new(Vec::new(), 0, page)));

        let body: ApiResponse<PageResponse<OrderResponse>> =
            TestClient::get("http://example.com/orders")
                .send(&app.service(Some(seller), route()))
                .await
                .take_json()
                .await?;

        assert!(body.data.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.orders.expect_list_orders().never();

        let mut res = TestClient::get("http://example.com/orders?status=lost")
            .send(&app.service(Some(admin()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "unknown order status `lost`");

        Ok(())
    }
}
