//! Wishlist Records

use jiff::Timestamp;

use crate::domain::products::records::ProductUuid;

/// A saved product, as it looked when it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistItem {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_price: u64,
    pub product_image: Option<String>,
    pub added_at: Timestamp,
}
