//! JSON response envelope.
//!
//! Every response body is `{ "success": bool, "message"?, "data"?, "error"? }`.

use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use salvo::{
    Scribe,
    http::{ResBody, StatusCode},
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use tantika_app::{
    domain::{BulkFailure, UnknownVariant},
    pagination::Paginated,
};

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Include the source of internal errors in client responses.
pub(crate) fn expose_internal_errors(enabled: bool) {
    EXPOSE_INTERNAL_ERRORS.store(enabled, Ordering::Relaxed);
}

/// Successful response carrying data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApiResponse<T: ToSchema + 'static> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub data: T,
}

impl<T: ToSchema + 'static> ApiResponse<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    #[must_use]
    pub(crate) fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Shorthand for a successful JSON response.
pub(crate) fn ok<T: ToSchema + 'static>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::new(data))
}

/// Successful response with only a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub(crate) fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// One page of a list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse<T: ToSchema + 'static> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T: ToSchema + 'static> PageResponse<T> {
    pub(crate) fn from_paginated<R>(paginated: Paginated<R>) -> Self
    where
        R: Into<T>,
    {
        let total_pages = paginated.total_pages();

        Self {
            total: paginated.total,
            page: paginated.page.page(),
            limit: paginated.page.limit(),
            total_pages,
            items: paginated.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// One item of a bulk request that could not be applied.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkFailureResponse {
    pub uuid: Uuid,
    pub reason: String,
}

impl<T: Into<Uuid>> From<BulkFailure<T>> for BulkFailureResponse {
    fn from(failure: BulkFailure<T>) -> Self {
        Self {
            uuid: failure.uuid.into(),
            reason: failure.reason,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// An error rendered as the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// A client error carrying `error`'s display text, sentence-cased.
    pub(crate) fn client(status: StatusCode, error: &impl Display) -> Self {
        let message = error.to_string();
        let mut chars = message.chars();

        let message: String = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();

        Self::new(status, message)
    }

    /// Log `source` and hide it from the client outside development.
    pub(crate) fn internal(context: &str, source: impl Display) -> Self {
        error!("{context}: {source}");

        let message = if EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed) {
            format!("{context}: {source}")
        } else {
            "Internal server error".to_string()
        };

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl From<UnknownVariant> for ApiError {
    fn from(error: UnknownVariant) -> Self {
        Self::bad_request(error.to_string())
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorBody {
            success: false,
            error: self.message,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);
    }
}

/// Render framework errors (unknown routes, unparseable bodies) as the failure envelope.
#[handler]
pub(crate) async fn catch_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    if !(status.is_client_error() || status.is_server_error()) {
        return;
    }

    let message = match &res.body {
        ResBody::Error(error) => error.brief.clone(),
        _ => status.canonical_reason().unwrap_or("Error").to_string(),
    };

    res.body = ResBody::None;
    res.render(ApiError::new(status, message));

    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::{
        catcher::Catcher,
        test::{ResponseExt, TestClient},
    };
    use serde_json::Value;
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn failing() -> Result<Json<ApiResponse<String>>, ApiError> {
        Err(ApiError::forbidden("You do not own this product"))
    }

    #[handler]
    async fn succeeding() -> Json<ApiResponse<String>> {
        Json(ApiResponse::new("hello".to_string()).message("Greeted"))
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("fail").get(failing))
                .push(Router::with_path("ok").get(succeeding)),
        )
        .catcher(Catcher::default().hoop(catch_errors))
    }

    #[tokio::test]
    async fn errors_render_the_failure_envelope() -> TestResult {
        let mut res = TestClient::get("http://example.com/fail")
            .send(&make_service())
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(!body.success);
        assert_eq!(body.error, "You do not own this product");

        Ok(())
    }

    #[tokio::test]
    async fn success_carries_message_and_data() -> TestResult {
        let body: Value = TestClient::get("http://example.com/ok")
            .send(&make_service())
            .await
            .take_json()
            .await?;

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Greeted");
        assert_eq!(body["data"], "hello");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_render_the_failure_envelope() -> TestResult {
        let mut res = TestClient::get("http://example.com/missing")
            .send(&make_service())
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.success);

        Ok(())
    }

    #[test]
    fn internal_errors_hide_their_source_by_default() {
        let error = ApiError::internal("failed to load orders", "connection reset");

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn client_errors_are_sentence_cased() {
        let error = ApiError::client(StatusCode::NOT_FOUND, &"order not found");

        assert_eq!(error.message(), "Order not found");
    }

    #[test]
    fn message_is_omitted_when_absent() -> TestResult {
        let json = serde_json::to_value(ApiResponse::new(3_u64))?;

        assert_eq!(json, serde_json::json!({ "success": true, "data": 3 }));

        Ok(())
    }
}
