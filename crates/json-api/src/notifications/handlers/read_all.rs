//! Read All Notifications Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    notifications::models::MarkedReadResponse,
    state::State,
};

/// Read All Notifications Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark All Notifications Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notifications marked read"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<MarkedReadResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let updated = state.app.notifications.mark_all_read(actor).await?;

    Ok(Json(
        ApiResponse::new(MarkedReadResponse { updated })
            .message("All notifications marked as read"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockApp, customer};

    use super::*;

    #[tokio::test]
    async fn test_reports_how_many_changed() -> TestResult {
        let reader = customer();
        let mut app = MockApp::new();

        app.notifications
            .expect_mark_all_read()
            .once()
            .withf(move |actor| *actor == reader)
            .return_once(|_| Ok(3));

        let body: ApiResponse<MarkedReadResponse> =
            TestClient::put("http://example.com/notifications/read-all")
                .send(&app.service(
                    Some(reader),
                    Router::with_path("notifications/read-all").put(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.updated, 3);

        Ok(())
    }
}
