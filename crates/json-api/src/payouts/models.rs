//! Payout Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::payouts::records::PayoutRecord;

/// Payout Response; amounts in paise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayoutResponse {
    pub uuid: Uuid,
    pub artisan_uuid: Uuid,
    pub artisan_name: String,
    pub requested_amount: u64,

    /// Value of the settled order lines
    pub amount: u64,

    pub processing_fee: u64,
    pub gst: u64,
    pub net_amount: u64,
    pub bank_account_last4: String,
    pub bank_ifsc: String,
    pub status: String,
    pub transaction_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub processed_by: Option<Uuid>,
    pub processed_at: Option<String>,
    pub order_lines: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PayoutRecord> for PayoutResponse {
    fn from(payout: PayoutRecord) -> Self {
        Self {
            uuid: payout.uuid.into_uuid(),
            artisan_uuid: payout.artisan_uuid.into_uuid(),
            artisan_name: payout.artisan_name,
            requested_amount: payout.requested_amount,
            amount: payout.amount,
            processing_fee: payout.fees.processing_fee,
            gst: payout.fees.gst,
            net_amount: payout.fees.net_amount,
            bank_account_last4: payout.bank_account_last4,
            bank_ifsc: payout.bank_ifsc,
            status: payout.status.to_string(),
            transaction_reference: payout.transaction_reference,
            failure_reason: payout.failure_reason,
            processed_by: payout.processed_by.map(|user| user.into_uuid()),
            processed_at: payout.processed_at.map(|at| at.to_string()),
            order_lines: payout.order_lines,
            created_at: payout.created_at.to_string(),
            updated_at: payout.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BalanceResponse {
    /// Paise available to request
    pub available_balance: u64,
}
