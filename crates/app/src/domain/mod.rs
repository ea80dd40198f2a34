//! Tantika Domain Concerns

use std::fmt::Display;

use thiserror::Error;

pub mod artisans;
pub mod notifications;
pub mod orders;
pub mod payouts;
pub mod products;
pub mod reports;
pub mod users;
pub mod wishlists;

/// A stored or submitted value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// One item of a bulk operation that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure<T> {
    pub uuid: T,
    pub reason: String,
}

impl<T> BulkFailure<T> {
    pub(crate) fn new(uuid: T, reason: impl Display) -> Self {
        Self {
            uuid,
            reason: reason.to_string(),
        }
    }
}

/// Trim a required text field, rejecting blank values.
pub(crate) fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim an optional text field, treating blank values as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value.and_then(required_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("  Jaipur "), Some("Jaipur".to_string()));
        assert_eq!(required_text("   "), None);
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
    }
}
