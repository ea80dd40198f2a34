//! Add Order Note Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::orders::{data::NewOrderNote, records::OrderNoteKind};

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    orders::models::OrderNoteResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddNoteRequest {
    /// `admin` for internal notes, `contact` to log a customer call
    #[serde(default = "default_kind")]
    pub kind: String,

    pub body: String,
}

fn default_kind() -> String {
    OrderNoteKind::Admin.to_string()
}

impl TryFrom<AddNoteRequest> for NewOrderNote {
    type Error = ApiError;

    fn try_from(request: AddNoteRequest) -> Result<Self, Self::Error> {
        Ok(NewOrderNote {
            kind: request.kind.trim().parse()?,
            body: request.body,
        })
    }
}

/// Add Order Note Handler
///
/// A `contact` note on a pending order also marks it contacted.
#[endpoint(
    tags("admin"),
    summary = "Add Order Note",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Note added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty note or unknown kind"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.add_note",
    skip(order, json, depot, res),
    fields(order_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<AddNoteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<OrderNoteResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let note = NewOrderNote::try_from(json.into_inner())?;

    let note = state
        .app
        .orders
        .add_order_note(admin, order.into(), note)
        .await?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(OrderNoteResponse::from(note)).message("Note added"),
    ))
}
