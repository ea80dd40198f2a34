//! Artisan Requests and Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::artisans::{
    data::{ArtisanProfileUpdate, BulkDecisionOutcome},
    records::{ArtisanRecord, ArtisanStats, BankDetails, IdentityProof},
};

use crate::envelope::BulkFailureResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdentityProofResponse {
    /// e.g. `aadhaar`, `pan`
    pub kind: Option<String>,
    pub number: Option<String>,
    pub verified: bool,
    pub verified_at: Option<String>,
}

impl From<IdentityProof> for IdentityProofResponse {
    fn from(proof: IdentityProof) -> Self {
        Self {
            kind: proof.kind,
            number: proof.number,
            verified: proof.verified,
            verified_at: proof.verified_at.map(|at| at.to_string()),
        }
    }
}

/// Bank details; the account number is masked to its last four digits.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BankDetailsResponse {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub bank_name: Option<String>,
    pub verified: bool,
    pub verified_at: Option<String>,
}

impl From<BankDetails> for BankDetailsResponse {
    fn from(details: BankDetails) -> Self {
        Self {
            account_holder: details.account_holder,
            account_number: details.account_number,
            ifsc: details.ifsc,
            bank_name: details.bank_name,
            verified: details.verified,
            verified_at: details.verified_at.map(|at| at.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ArtisanResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_name: String,
    pub description: String,
    pub specialties: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub identity_proof: IdentityProofResponse,
    pub bank_details: BankDetailsResponse,

    /// `pending`, `approved`, `rejected` or `suspended`
    pub status: String,

    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub suspension_reason: Option<String>,
    pub approved_at: Option<String>,
    pub rejected_at: Option<String>,
    pub suspended_at: Option<String>,
    pub total_products: u64,
    pub total_sales: u64,

    /// Paise
    pub total_revenue: u64,

    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ArtisanRecord> for ArtisanResponse {
    fn from(artisan: ArtisanRecord) -> Self {
        Self {
            uuid: artisan.uuid.into_uuid(),
            user_uuid: artisan.user_uuid.into_uuid(),
            name: artisan.contact.name,
            email: artisan.contact.email,
            phone: artisan.contact.phone,
            business_name: artisan.business_name,
            description: artisan.description,
            specialties: artisan.specialties,
            city: artisan.city,
            state: artisan.state,
            identity_proof: artisan.identity_proof.into(),
            bank_details: artisan.bank_details.into(),
            status: artisan.status.to_string(),
            admin_notes: artisan.admin_notes,
            rejection_reason: artisan.rejection_reason,
            suspension_reason: artisan.suspension_reason,
            approved_at: artisan.approved_at.map(|at| at.to_string()),
            rejected_at: artisan.rejected_at.map(|at| at.to_string()),
            suspended_at: artisan.suspended_at.map(|at| at.to_string()),
            total_products: artisan.total_products,
            total_sales: artisan.total_sales,
            total_revenue: artisan.total_revenue,
            rating: artisan.rating,
            created_at: artisan.created_at.to_string(),
            updated_at: artisan.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ArtisanStatsResponse {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub suspended: u64,
}

impl From<ArtisanStats> for ArtisanStatsResponse {
    fn from(stats: ArtisanStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            approved: stats.approved,
            rejected: stats.rejected,
            suspended: stats.suspended,
        }
    }
}

/// Profile fields; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ProfileUpdateRequest {
    pub business_name: Option<String>,
    pub description: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl From<ProfileUpdateRequest> for ArtisanProfileUpdate {
    fn from(request: ProfileUpdateRequest) -> Self {
        ArtisanProfileUpdate {
            business_name: request.business_name,
            description: request.description,
            specialties: request.specialties,
            city: request.city,
            state: request.state,
        }
    }
}

/// Bulk approve and bulk reject take the same list of artisans.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkDecisionRequest {
    pub artisans: Vec<Uuid>,

    /// Required for bulk reject
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkApproveResponse {
    pub approved: Vec<Uuid>,
    pub already_approved: Vec<Uuid>,
    pub failed: Vec<BulkFailureResponse>,
}

impl From<BulkDecisionOutcome> for BulkApproveResponse {
    fn from(outcome: BulkDecisionOutcome) -> Self {
        Self {
            approved: outcome.applied.into_iter().map(Into::into).collect(),
            already_approved: outcome.unchanged.into_iter().map(Into::into).collect(),
            failed: outcome.failed.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkRejectResponse {
    pub rejected: Vec<Uuid>,
    pub already_rejected: Vec<Uuid>,
    pub failed: Vec<BulkFailureResponse>,
}

impl From<BulkDecisionOutcome> for BulkRejectResponse {
    fn from(outcome: BulkDecisionOutcome) -> Self {
        Self {
            rejected: outcome.applied.into_iter().map(Into::into).collect(),
            already_rejected: outcome.unchanged.into_iter().map(Into::into).collect(),
            failed: outcome.failed.into_iter().map(Into::into).collect(),
        }
    }
}
