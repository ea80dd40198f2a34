//! Admin Payout Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use tantika_app::domain::payouts::{data::PayoutFilter, records::PayoutStatus};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    payouts::models::PayoutResponse,
    state::State,
};

/// Admin Payout Index Handler
#[endpoint(
    tags("admin"),
    summary = "List Payouts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of payouts"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<PayoutResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = PayoutFilter {
        status: parse_optional::<PayoutStatus>(status)?,
    };

    let payouts = state
        .app
        .payouts
        .list_all_payouts(filter, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(payouts)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::{
        domain::{artisans::records::ArtisanUuid, payouts::records::PayoutUuid},
        pagination::Paginated,
    };

    use crate::test_helpers::{MockApp, admin, make_payout};

    use super::*;

    #[tokio::test]
    async fn test_filters_by_status() -> TestResult {
        let mut app = MockApp::new();

        app.payouts
            .expect_list_all_payouts()
            .once()
            .withf(|filter, _| filter.status == Some(PayoutStatus::Processing))
            .return_once(|_, page| {
                let mut payout = make_payout(PayoutUuid::new(), ArtisanUuid::new());
                payout.status = PayoutStatus::Processing;
                Ok(Paginated::new(vec![payout], 1, page))
            });

        let body: ApiResponse<PageResponse<PayoutResponse>> =
            TestClient::get("http://example.com/admin/payouts?status=processing")
                .send(&app.service(
                    Some(admin()),
                    Router::with_path("admin/payouts").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.items[0].status, "processing");

        Ok(())
    }
}
