//! Change Password Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    account::models::ChangePasswordRequest,
    envelope::{ApiError, ApiMessage},
    extensions::*,
    state::State,
};

/// Change Password Handler
///
/// Other sessions are signed out; the current one stays valid.
#[endpoint(
    tags("account"),
    summary = "Change Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Wrong current password or too short"),
    ),
)]
#[tracing::instrument(name = "account.change_password", skip(json, depot), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<ChangePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state
        .app
        .users
        .change_password(actor, json.into_inner().into())
        .await?;

    Ok(ApiMessage::new("Password updated"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::users::UsersServiceError;

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, customer},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("usernorms/password").put(handler)
    }

    fn body() -> serde_json::Value {
        json!({
            "current_password": "correct-horse-battery",
            "new_password": "staple-the-horse-battery",
        })
    }

    #[tokio::test]
    async fn test_changes_the_password() -> TestResult {
        let me = customer();
        let mut app = MockApp::new();

        app.users
            .expect_change_password()
            .once()
            .withf(move |actor, change| {
                *actor == me
                    && change.current_password == "correct-horse-battery"
                    && change.new_password == "staple-the-horse-battery"
            })
            .return_once(|_, _| Ok(()));

        let body: ApiMessage = TestClient::put("http://example.com/usernorms/password")
            .json(&body())
            .send(&app.service(Some(me), route()))
            .await
            .take_json()
            .await?;

        assert_eq!(body.message, "Password updated");

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_current_password_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.users
            .expect_change_password()
            .once()
            .return_once(|_, _| Err(UsersServiceError::IncorrectPassword));

        let mut res = TestClient::put("http://example.com/usernorms/password")
            .json(&body())
            .send(&app.service(Some(customer()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Current password is incorrect");

        Ok(())
    }
}
