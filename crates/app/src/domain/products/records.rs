//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{UnknownVariant, artisans::records::ArtisanUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Stock at or below this level (but above zero) is reported as low.
pub const LOW_STOCK_THRESHOLD: u64 = 5;

/// Catalogue status, derived from stock unless the product is a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    Active,
    OutOfStock,
    LowStock,
    Draft,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OutOfStock => "out_of_stock",
            Self::LowStock => "low_stock",
            Self::Draft => "draft",
        }
    }

    #[must_use]
    pub const fn for_stock(stock: u64) -> Self {
        match stock {
            0 => Self::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::Active,
        }
    }

    /// Status after a write. `draft` switches drafting on or off; when it is
    /// absent a draft stays a draft.
    #[must_use]
    pub const fn after_write(self, draft: Option<bool>, stock: u64) -> Self {
        match (draft, self) {
            (Some(true), _) | (None, Self::Draft) => Self::Draft,
            _ => Self::for_stock(stock),
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "out_of_stock" => Ok(Self::OutOfStock),
            "low_stock" => Ok(Self::LowStock),
            "draft" => Ok(Self::Draft),
            other => Err(UnknownVariant::new("product status", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalStatus {
    Approved,
    Pending,
    Rejected,
}

impl ApprovalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant::new("approval status", other)),
        }
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub artisan_uuid: ArtisanUuid,
    pub artisan_name: String,
    pub name: String,
    pub description: String,
    pub category: String,

    /// Paise.
    pub price: u64,

    pub stock: u64,
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether customers may browse and buy the product.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved && self.status != ProductStatus::Draft
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub products: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
    pub out_of_stock: u64,
    pub low_stock: u64,
    pub draft: u64,
}
