//! Artisan Earnings Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    reports::models::ArtisanEarningsResponse,
    state::State,
};

/// Artisan Earnings Handler
#[endpoint(
    tags("artisan"),
    summary = "Artisan Earnings",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Earnings summary"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisan access required"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanEarningsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let earnings = state.app.reports.artisan_earnings(actor).await?;

    Ok(ok(earnings.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::reports::{ReportsServiceError, records::ArtisanEarnings};

    use crate::test_helpers::{MockApp, artisan, customer};

    use super::*;

    fn route() -> Router {
        Router::with_path("artisan/earnings").get(handler)
    }

    #[tokio::test]
    async fn test_returns_earnings() -> TestResult {
        let mut app = MockApp::new();

        app.reports.expect_artisan_earnings().once().return_once(|_| {
            Ok(ArtisanEarnings {
                total_earned: 100_000,
                available_balance: 40_000,
                pending_payouts: 60_000,
                paid_out: 0,
            })
        });

        let body: ApiResponse<ArtisanEarningsResponse> =
            TestClient::get("http://example.com/artisan/earnings")
                .send(&app.service(Some(artisan()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.total_earned, 100_000);
        assert_eq!(body.data.pending_payouts, 60_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_customers_are_forbidden() -> TestResult {
        let mut app = MockApp::new();

        app.reports
            .expect_artisan_earnings()
            .once()
            .return_once(|_| Err(ReportsServiceError::Forbidden));

        let res = TestClient::get("http://example.com/artisan/earnings")
            .send(&app.service(Some(customer()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
