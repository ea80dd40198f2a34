//! Artisan Dashboard Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    reports::models::ArtisanDashboardResponse,
    state::State,
};

/// Artisan Dashboard Handler
///
/// Product and order counts, revenue, balance, six months of revenue and the
/// five best sellers.
#[endpoint(
    tags("artisan"),
    summary = "Artisan Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Dashboard figures"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisan access required"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanDashboardResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let dashboard = state.app.reports.artisan_dashboard(actor).await?;

    Ok(ok(dashboard.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::{
        products::records::ProductUuid,
        reports::records::{
            ArtisanDashboard, MonthlyRevenue, OrderCounts, ProductCounts, TopProduct,
        },
    };

    use crate::test_helpers::{MockApp, artisan};

    use super::*;

    #[tokio::test]
    async fn test_returns_sales_figures() -> TestResult {
        let seller = artisan();
        let top = ProductUuid::new();
        let mut app = MockApp::new();

        app.reports
            .expect_artisan_dashboard()
            .once()
            .withf(move |actor| *actor == seller)
            .return_once(move |_| {
                Ok(ArtisanDashboard {
                    products: ProductCounts {
                        total: 2,
                        approved: 2,
                        ..ProductCounts::default()
                    },
                    orders: OrderCounts {
                        total: 3,
                        delivered: 2,
                        pending: 1,
                        ..OrderCounts::default()
                    },
                    revenue: 100_000,
                    available_balance: 100_000,
                    monthly_revenue: vec![MonthlyRevenue {
                        month: "2026-10".to_string(),
                        revenue: 100_000,
                    }],
                    top_products: vec![TopProduct {
                        product_uuid: top,
                        product_name: "Terracotta cup".to_string(),
                        units: 3,
                        revenue: 40_000,
                    }],
                })
            });

        let body: ApiResponse<ArtisanDashboardResponse> =
            TestClient::get("http://example.com/artisan/dashboard")
                .send(&app.service(
                    Some(seller),
                    Router::with_path("artisan/dashboard").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.products.total, 2);
        assert_eq!(body.data.orders.delivered, 2);
        assert_eq!(body.data.monthly_revenue[0].month, "2026-10");
        assert_eq!(body.data.top_products[0].product_uuid, top.into_uuid());

        Ok(())
    }
}
