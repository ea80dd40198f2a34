//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tantika_app::auth::Credentials;

use crate::{
    auth::{SessionResponse, cookie},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::FORBIDDEN, description = "Account is deactivated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = state
        .app
        .auth
        .login(Credentials {
            email: request.email,
            password: request.password,
        })
        .await?;

    tracing::info!(user_uuid = %issued.user.uuid, role = %issued.user.role, "signed in");

    cookie::set_session(res, &issued.token, state.http);

    Ok(Json(
        ApiResponse::new(SessionResponse::from(issued)).message("Login successful"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::{auth::AuthServiceError, domain::users::records::UserRole};

    use crate::{auth::handlers::tests::make_session, envelope::ErrorBody, test_helpers::MockApp};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.service(None, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_session() -> TestResult {
        let mut app = MockApp::new();

        app.auth
            .expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "meera@example.com"
                    && credentials.password == "correct-horse-battery"
            })
            .return_once(|_| Ok(make_session(UserRole::Admin)));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "meera@example.com", "password": "correct-horse-battery" }))
            .send(&make_service(app))
            .await;

        let body: ApiResponse<SessionResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message.as_deref(), Some("Login successful"));
        assert_eq!(body.data.user.role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_returns_401() -> TestResult {
        let mut app = MockApp::new();

        app.auth
            .expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "meera@example.com", "password": "wrong-password" }))
            .send(&make_service(app))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "Invalid email or password");

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivated_account_returns_403() -> TestResult {
        let mut app = MockApp::new();

        app.auth
            .expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::Inactive));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "meera@example.com", "password": "correct-horse-battery" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
