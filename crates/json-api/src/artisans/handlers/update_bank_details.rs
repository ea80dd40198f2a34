//! Update Bank Details Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tantika_app::domain::artisans::data::BankDetailsUpdate;

use crate::{
    artisans::models::BankDetailsResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct BankDetailsRequest {
    pub account_holder: String,

    /// 9 to 18 digits
    pub account_number: String,

    pub ifsc: String,
    pub bank_name: String,
}

impl fmt::Debug for BankDetailsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankDetailsRequest")
            .field("account_holder", &self.account_holder)
            .field("account_number", &"**redacted**")
            .field("ifsc", &self.ifsc)
            .field("bank_name", &self.bank_name)
            .finish()
    }
}

impl From<BankDetailsRequest> for BankDetailsUpdate {
    fn from(request: BankDetailsRequest) -> Self {
        BankDetailsUpdate {
            account_holder: request.account_holder,
            account_number: request.account_number,
            ifsc: request.ifsc,
            bank_name: request.bank_name,
        }
    }
}

/// Update Bank Details Handler
///
/// Replaces the payout account. An admin must verify it again before the
/// next payout.
#[endpoint(
    tags("artisan"),
    summary = "Update Own Bank Details",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bank details saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid account number or IFSC"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BankDetailsRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BankDetailsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let details = state
        .app
        .artisans
        .update_bank_details(actor, json.into_inner().into())
        .await?;

    Ok(Json(
        ApiResponse::new(BankDetailsResponse::from(details))
            .message("Bank details saved. They will be verified before your next payout."),
    ))
}
