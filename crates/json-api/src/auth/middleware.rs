//! Auth middleware.
//!
//! Sessions arrive as a bearer token or the session cookie. `required`
//! rejects anonymous requests; `optional` lets them through without an actor.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use tantika_app::auth::{Actor, AuthServiceError};

use crate::{auth::cookie::SESSION_COOKIE, envelope::ApiError, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn required(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_token(req) else {
        res.render(ApiError::unauthorized("Authentication required"));
        ctrl.skip_rest();

        return;
    };

    match authenticate(depot, &token).await {
        Ok(actor) => {
            depot.insert_actor(actor);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

#[salvo::handler]
pub(crate) async fn optional(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(token) = extract_token(req) {
        match authenticate(depot, &token).await {
            Ok(actor) => depot.insert_actor(actor),
            Err(error) => debug!(error = error.message(), "continuing without a session"),
        }
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(depot: &Depot, token: &str) -> Result<Actor, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::NotFound | AuthServiceError::InvalidCredentials => {
                ApiError::unauthorized("Session expired or invalid")
            }
            error => error.into(),
        })
}

/// Bearer header first, then the session cookie.
fn extract_token(req: &Request) -> Option<String> {
    extract_bearer_token(req)
        .map(ToString::to_string)
        .or_else(|| {
            req.cookie(SESSION_COOKIE)
                .map(|cookie| cookie.value().trim().to_string())
                .filter(|token| !token.is_empty())
        })
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{MockApp, customer};

    use super::*;

    #[salvo::handler]
    async fn echo_actor(depot: &mut Depot, res: &mut Response) {
        let actor = depot
            .actor()
            .map_or_else(|| "anonymous".to_string(), |actor| actor.user.to_string());

        res.render(actor);
    }

    fn make_service(app: MockApp, gate: impl Handler) -> Service {
        app.service(None, Router::new().hoop(gate).push(Router::new().get(echo_actor)))
    }

    #[tokio::test]
    async fn test_missing_token_returns_401() -> TestResult {
        let mut app = MockApp::new();

        app.auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(app, required))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut app = MockApp::new();

        app.auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(app, required))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_session_returns_401() -> TestResult {
        let mut app = MockApp::new();

        app.auth
            .expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::Unauthenticated));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(app, required))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_bearer_token_injects_actor() -> TestResult {
        let actor = customer();
        let mut app = MockApp::new();

        app.auth
            .expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(move |_| Ok(actor));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(app, required))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, actor.user.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_session_cookie_injects_actor() -> TestResult {
        let actor = customer();
        let mut app = MockApp::new();

        app.auth
            .expect_authenticate()
            .once()
            .withf(|token| token == "cookie-token")
            .return_once(move |_| Ok(actor));

        let mut res = TestClient::get("http://example.com")
            .add_header(COOKIE, format!("{SESSION_COOKIE}=cookie-token"), true)
            .send(&make_service(app, required))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, actor.user.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_auth_allows_anonymous_requests() -> TestResult {
        let mut app = MockApp::new();

        app.auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(app, optional))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_auth_ignores_invalid_sessions() -> TestResult {
        let mut app = MockApp::new();

        app.auth
            .expect_authenticate()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthenticated));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer stale", true)
            .send(&make_service(app, optional))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }
}
