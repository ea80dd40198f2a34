//! Payout Balance Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    payouts::models::BalanceResponse,
    state::State,
};

/// Payout Balance Handler
///
/// Delivered and paid order value not yet claimed by a payout.
#[endpoint(
    tags("artisan"),
    summary = "Available Balance",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Available balance in paise"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisan access required"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BalanceResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let available_balance = state.app.payouts.available_balance(actor).await?;

    Ok(ok(BalanceResponse { available_balance }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::payouts::PayoutsServiceError;

    use crate::test_helpers::{MockApp, artisan, customer};

    use super::*;

    fn route() -> Router {
        Router::with_path("artisan/payouts/balance").get(handler)
    }

    #[tokio::test]
    async fn test_returns_the_balance() -> TestResult {
        let mut app = MockApp::new();

        app.payouts
            .expect_available_balance()
            .once()
            .return_once(|_| Ok(100_000));

        let body: ApiResponse<BalanceResponse> =
            TestClient::get("http://example.com/artisan/payouts/balance")
                .send(&app.service(Some(artisan()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.available_balance, 100_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_customers_are_forbidden() -> TestResult {
        let mut app = MockApp::new();

        app.payouts
            .expect_available_balance()
            .once()
            .return_once(|_| Err(PayoutsServiceError::Forbidden));

        let res = TestClient::get("http://example.com/artisan/payouts/balance")
            .send(&app.service(Some(customer()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
