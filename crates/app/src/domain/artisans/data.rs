//! Artisans Data

use crate::domain::{
    BulkFailure, optional_text, required_text,
    artisans::{
        errors::ArtisansServiceError,
        records::{ArtisanStatus, ArtisanUuid},
    },
};

/// Profile submitted with an artisan application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtisanProfile {
    pub business_name: String,
    pub description: Option<String>,
    pub specialties: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub identity_proof_kind: String,
    pub identity_proof_number: String,
}

impl NewArtisanProfile {
    pub(crate) fn validated(self) -> Result<Self, ArtisansServiceError> {
        Ok(Self {
            business_name: required_text(&self.business_name)
                .ok_or(ArtisansServiceError::InvalidInput("business name is required"))?,
            description: optional_text(self.description.as_deref()),
            specialties: normalize_specialties(self.specialties),
            city: optional_text(self.city.as_deref()),
            state: optional_text(self.state.as_deref()),
            identity_proof_kind: required_text(&self.identity_proof_kind)
                .ok_or(ArtisansServiceError::InvalidInput("identity proof type is required"))?,
            identity_proof_number: required_text(&self.identity_proof_number).ok_or(
                ArtisansServiceError::InvalidInput("identity proof number is required"),
            )?,
        })
    }
}

/// Self-service or admin profile edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtisanProfileUpdate {
    pub business_name: Option<String>,
    pub description: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl ArtisanProfileUpdate {
    pub(crate) fn validated(self) -> Result<Self, ArtisansServiceError> {
        let business_name = match self.business_name {
            Some(name) => Some(
                required_text(&name)
                    .ok_or(ArtisansServiceError::InvalidInput("business name is required"))?,
            ),
            None => None,
        };

        Ok(Self {
            business_name,
            description: self.description.map(|d| d.trim().to_string()),
            specialties: self.specialties.map(normalize_specialties),
            city: optional_text(self.city.as_deref()),
            state: optional_text(self.state.as_deref()),
        })
    }
}

/// Admin edit of an artisan, optionally moving its review status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtisanUpdate {
    pub profile: ArtisanProfileUpdate,
    pub admin_notes: Option<String>,
    pub status: Option<ArtisanStatus>,

    /// Required when `status` rejects or suspends.
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDetailsUpdate {
    pub account_holder: String,
    pub account_number: String,
    pub ifsc: String,
    pub bank_name: String,
}

impl BankDetailsUpdate {
    pub(crate) fn validated(self) -> Result<Self, ArtisansServiceError> {
        let account_holder = required_text(&self.account_holder)
            .ok_or(ArtisansServiceError::InvalidInput("account holder name is required"))?;

        let bank_name = required_text(&self.bank_name)
            .ok_or(ArtisansServiceError::InvalidInput("bank name is required"))?;

        let account_number = self
            .account_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();

        if !(9..=18).contains(&account_number.len())
            || !account_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ArtisansServiceError::InvalidInput(
                "account number must be 9 to 18 digits",
            ));
        }

        let ifsc = self.ifsc.trim().to_ascii_uppercase();

        if !is_valid_ifsc(&ifsc) {
            return Err(ArtisansServiceError::InvalidInput("IFSC code is invalid"));
        }

        Ok(Self {
            account_holder,
            account_number,
            ifsc,
            bank_name,
        })
    }
}

/// Four bank letters, a zero, then six branch characters.
#[must_use]
pub fn is_valid_ifsc(ifsc: &str) -> bool {
    let Some((bank, branch)) = ifsc.split_at_checked(4) else {
        return false;
    };

    match branch.as_bytes().split_first() {
        Some((b'0', branch)) => {
            branch.len() == 6
                && bank.bytes().all(|byte| byte.is_ascii_uppercase())
                && branch.iter().all(u8::is_ascii_alphanumeric)
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtisanFilter {
    pub status: Option<ArtisanStatus>,
    pub search: Option<String>,
}

/// Per-item result of a bulk approve or reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDecisionOutcome {
    /// Artisans whose status changed.
    pub applied: Vec<ArtisanUuid>,

    /// Artisans already in the requested status.
    pub unchanged: Vec<ArtisanUuid>,

    pub failed: Vec<BulkFailure<ArtisanUuid>>,
}

fn normalize_specialties(specialties: Vec<String>) -> Vec<String> {
    let mut normalized = Vec::with_capacity(specialties.len());

    for specialty in specialties {
        if let Some(specialty) = required_text(&specialty)
            && !normalized.contains(&specialty)
        {
            normalized.push(specialty);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_update(account_number: &str, ifsc: &str) -> BankDetailsUpdate {
        BankDetailsUpdate {
            account_holder: "Lakshmi Weaves".to_string(),
            account_number: account_number.to_string(),
            ifsc: ifsc.to_string(),
            bank_name: "Canara Bank".to_string(),
        }
    }

    #[test]
    fn ifsc_codes_follow_the_bank_branch_layout() {
        assert!(is_valid_ifsc("CNRB0001234"));
        assert!(is_valid_ifsc("HDFC0ABC123"));
        assert!(!is_valid_ifsc("CNRB1001234"));
        assert!(!is_valid_ifsc("CNRB000123"));
    }

    #[test]
    fn bank_update_normalizes_ifsc_and_spaces() -> Result<(), ArtisansServiceError> {
        let update = bank_update("1234 5678 9012", " cnrb0001234 ").validated()?;

        assert_eq!(update.account_number, "123456789012");
        assert_eq!(update.ifsc, "CNRB0001234");

        Ok(())
    }

    #[test]
    fn bank_update_rejects_short_account_numbers() {
        assert!(matches!(
            bank_update("12345", "CNRB0001234").validated(),
            Err(ArtisansServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn application_requires_identity_proof() {
        let profile = NewArtisanProfile {
            business_name: "Lakshmi Weaves".to_string(),
            description: None,
            specialties: vec!["Ikat".to_string(), " ikat ".to_string(), "Ikat".to_string()],
            city: Some("Pochampally".to_string()),
            state: Some("Telangana".to_string()),
            identity_proof_kind: "aadhaar".to_string(),
            identity_proof_number: "  ".to_string(),
        };

        assert!(matches!(
            profile.validated(),
            Err(ArtisansServiceError::InvalidInput("identity proof number is required"))
        ));
    }

    #[test]
    fn specialties_are_trimmed_and_deduplicated() {
        assert_eq!(
            normalize_specialties(vec![
                "Ikat".to_string(),
                " Ikat ".to_string(),
                String::new(),
                "Block print".to_string(),
            ]),
            vec!["Ikat".to_string(), "Block print".to_string()]
        );
    }
}
