//! Artisan Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{UnknownVariant, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Artisan UUID
pub type ArtisanUuid = TypedUuid<ArtisanRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtisanStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl ArtisanStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for ArtisanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtisanStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "suspended" => Ok(Self::Suspended),
            other => Err(UnknownVariant::new("artisan status", other)),
        }
    }
}

/// Owner account details shown alongside the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtisanContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProof {
    pub kind: Option<String>,
    pub number: Option<String>,
    pub verified: bool,
    pub verified_by: Option<UserUuid>,
    pub verified_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDetails {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub bank_name: Option<String>,
    pub verified: bool,
    pub verified_by: Option<UserUuid>,
    pub verified_at: Option<Timestamp>,
}

impl BankDetails {
    /// Every field a payout needs is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.account_holder.is_some()
            && self.account_number.is_some()
            && self.ifsc.is_some()
            && self.bank_name.is_some()
    }

    /// Copy with the account number reduced to its last four digits.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            account_number: self.account_number.as_deref().map(mask_account_number),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn account_last4(&self) -> Option<String> {
        self.account_number
            .as_deref()
            .map(|number| last_four(number).to_string())
    }
}

fn last_four(number: &str) -> &str {
    let start = number
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(index, _)| index);

    number.get(start..).unwrap_or(number)
}

/// `123456789012` becomes `XXXXXXXX9012`.
#[must_use]
pub fn mask_account_number(number: &str) -> String {
    let visible = last_four(number);
    let hidden = number.chars().count() - visible.chars().count();

    format!("{}{visible}", "X".repeat(hidden))
}

/// Artisan Record
#[derive(Debug, Clone, PartialEq)]
pub struct ArtisanRecord {
    pub uuid: ArtisanUuid,
    pub user_uuid: UserUuid,
    pub contact: ArtisanContact,
    pub business_name: String,
    pub description: String,
    pub specialties: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub identity_proof: IdentityProof,
    pub bank_details: BankDetails,
    pub status: ArtisanStatus,
    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub suspension_reason: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<UserUuid>,
    pub rejected_at: Option<Timestamp>,
    pub suspended_at: Option<Timestamp>,
    pub total_products: u64,
    pub total_sales: u64,
    pub total_revenue: u64,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArtisanRecord {
    /// Copy safe to hand to any reader: bank account masked.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.bank_details = self.bank_details.masked();
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtisanStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub suspended: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_numbers_keep_last_four_digits() {
        assert_eq!(mask_account_number("123456789012"), "XXXXXXXX9012");
        assert_eq!(mask_account_number("123"), "123");
    }

    #[test]
    fn masked_bank_details_keep_other_fields() {
        let details = BankDetails {
            account_holder: Some("Lakshmi Weaves".to_string()),
            account_number: Some("000111222333".to_string()),
            ifsc: Some("SBIN0001234".to_string()),
            bank_name: Some("State Bank of India".to_string()),
            verified: true,
            verified_by: None,
            verified_at: None,
        };

        let masked = details.masked();

        assert_eq!(masked.account_number.as_deref(), Some("XXXXXXXX2333"));
        assert_eq!(masked.ifsc, details.ifsc);
        assert!(masked.is_complete());
        assert_eq!(details.account_last4().as_deref(), Some("2333"));
    }

    #[test]
    fn bank_details_without_ifsc_are_incomplete() {
        let details = BankDetails {
            account_holder: Some("Lakshmi Weaves".to_string()),
            account_number: Some("000111222333".to_string()),
            ifsc: None,
            bank_name: Some("State Bank of India".to_string()),
            verified: false,
            verified_by: None,
            verified_at: None,
        };

        assert!(!details.is_complete());
    }
}
