//! Artisan Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use tantika_app::domain::artisans::{data::ArtisanFilter, records::ArtisanStatus};

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    state::State,
};

/// Artisan Index Handler
///
/// Newest first, optionally narrowed by review status and a search over
/// business name, contact name and email.
#[endpoint(
    tags("admin"),
    summary = "List Artisans",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of artisans"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<ArtisanResponse>>>, ApiError> {
    let status = parse_optional::<ArtisanStatus>(status)?;

    list(depot, status, search, page, limit).await
}

/// List artisans in `status`, shared by the status-specific listings.
pub(super) async fn list(
    depot: &Depot,
    status: Option<ArtisanStatus>,
    search: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
) -> Result<Json<ApiResponse<PageResponse<ArtisanResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ArtisanFilter {
        status,
        search: search.into_inner(),
    };

    let artisans = state
        .app
        .artisans
        .list_artisans(filter, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(artisans)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::{domain::artisans::records::ArtisanUuid, pagination::Paginated};

    use crate::{
        artisans::handlers::tests::artisan_with,
        envelope::ErrorBody,
        test_helpers::{MockApp, admin},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/artisans").get(handler)
    }

    #[tokio::test]
    async fn test_filters_by_status_and_search() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_list_artisans()
            .once()
            .withf(|filter, _| {
                filter.status == Some(ArtisanStatus::Suspended)
                    && filter.search.as_deref() == Some("looms")
            })
            .return_once(|_, page| {
                let artisan = artisan_with(ArtisanUuid::new(), ArtisanStatus::Suspended);
                Ok(Paginated::new(vec![artisan], 1, page))
            });

        let body: ApiResponse<PageResponse<ArtisanResponse>> =
            TestClient::get("http://example.com/admin/artisans?status=suspended&search=looms")
                .send(&app.service(Some(admin()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.items.len(), 1);
        assert_eq!(body.data.items[0].status, "suspended");
        assert_eq!(
            body.data.items[0].bank_details.account_number.as_deref(),
            Some("XXXXXXXX9012")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.artisans.expect_list_artisans().never();

        let mut res = TestClient::get("http://example.com/admin/artisans?status=banned")
            .send(&app.service(Some(admin()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "unknown artisan status `banned`");

        Ok(())
    }
}
