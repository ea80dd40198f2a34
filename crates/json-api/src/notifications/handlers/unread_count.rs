//! Unread Count Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    notifications::models::UnreadCountResponse,
    state::State,
};

/// Unread Count Handler
#[endpoint(
    tags("notifications"),
    summary = "Unread Notification Count",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Unread count"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let unread = state.app.notifications.unread_count(actor).await?;

    Ok(ok(UnreadCountResponse { unread }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockApp, admin};

    use super::*;

    #[tokio::test]
    async fn test_returns_the_count() -> TestResult {
        let mut app = MockApp::new();

        app.notifications
            .expect_unread_count()
            .once()
            .return_once(|_| Ok(4));

        let body: ApiResponse<UnreadCountResponse> =
            TestClient::get("http://example.com/notifications/unread-count")
                .send(&app.service(
                    Some(admin()),
                    Router::with_path("notifications/unread-count").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.unread, 4);

        Ok(())
    }
}
