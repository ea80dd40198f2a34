//! Payout Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant, artisans::records::ArtisanUuid, payouts::fees::PayoutFees,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Payout UUID
pub type PayoutUuid = TypedUuid<PayoutRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayoutStatus {
    Pending,
    Processing,
    Processed,
    Failed,
    Cancelled,
}

impl PayoutStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Processed => "processed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "processed" => Ok(Self::Processed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant::new("payout status", other)),
        }
    }
}

/// Payout Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutRecord {
    pub uuid: PayoutUuid,
    pub artisan_uuid: ArtisanUuid,
    pub artisan_name: String,

    /// What the artisan asked for.
    pub requested_amount: u64,

    /// Total of the claimed order lines; at least `requested_amount`.
    pub amount: u64,

    pub fees: PayoutFees,
    pub bank_account_last4: String,
    pub bank_ifsc: String,
    pub status: PayoutStatus,
    pub transaction_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub processed_by: Option<UserUuid>,
    pub processed_at: Option<Timestamp>,

    /// Order lines settled by this payout.
    pub order_lines: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
