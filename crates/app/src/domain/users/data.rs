//! Users Data

use std::fmt;

use crate::domain::{
    BulkFailure, optional_text, required_text,
    users::{
        errors::UsersServiceError,
        records::{UserRole, UserUuid},
    },
};

/// New User Data
#[derive(Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Admin-side user update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Self-service profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUserUpdate {
    pub users: Vec<UserUuid>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkUserUpdateOutcome {
    pub updated: Vec<UserUuid>,
    pub failed: Vec<BulkFailure<UserUuid>>,
}

#[derive(Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange(**redacted**)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub label: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressUpdate {
    pub label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}

/// Lower-cases and trims an email, rejecting values without a local part or domain.
pub fn normalize_email(email: &str) -> Result<String, UsersServiceError> {
    let email = email.trim().to_lowercase();

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(UsersServiceError::InvalidInput("a valid email is required")),
    }
}

/// Phone numbers keep digits and a leading `+`; blanks mean "no phone".
pub fn normalize_phone(phone: Option<&str>) -> Result<Option<String>, UsersServiceError> {
    let Some(phone) = optional_text(phone) else {
        return Ok(None);
    };

    let digits = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect::<String>();

    let (plus, rest) = digits
        .strip_prefix('+')
        .map_or(("", digits.as_str()), |rest| ("+", rest));

    if rest.len() < 7 || rest.len() > 15 || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err(UsersServiceError::InvalidInput("phone number is invalid"));
    }

    Ok(Some(format!("{plus}{rest}")))
}

pub fn normalize_name(name: &str) -> Result<String, UsersServiceError> {
    required_text(name).ok_or(UsersServiceError::InvalidInput("name is required"))
}

impl NewAddress {
    pub(crate) fn validated(self) -> Result<Self, UsersServiceError> {
        let required = |value: &str, message| {
            required_text(value).ok_or(UsersServiceError::InvalidInput(message))
        };

        Ok(Self {
            label: optional_text(self.label.as_deref()),
            street: required(&self.street, "street is required")?,
            city: required(&self.city, "city is required")?,
            state: required(&self.state, "state is required")?,
            postal_code: required(&self.postal_code, "postal code is required")?,
            country: optional_text(self.country.as_deref()),
            is_default: self.is_default,
        })
    }
}
