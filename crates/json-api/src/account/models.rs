//! Account Requests and Responses

use std::fmt;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::{
    users::{
        data::{AddressUpdate, NewAddress, PasswordChange, ProfileUpdate},
        records::AddressRecord,
    },
    wishlists::records::WishlistItem,
};

/// Profile Update Request; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(request: ProfileUpdateRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            phone: request.phone,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangePasswordRequest(**redacted**)")
    }
}

impl From<ChangePasswordRequest> for PasswordChange {
    fn from(request: ChangePasswordRequest) -> Self {
        PasswordChange {
            current_password: request.current_password,
            new_password: request.new_password,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NewAddressRequest {
    /// e.g. `Home`, `Work`
    #[serde(default)]
    pub label: Option<String>,

    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,

    /// Defaults to India
    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub is_default: bool,
}

impl From<NewAddressRequest> for NewAddress {
    fn from(request: NewAddressRequest) -> Self {
        NewAddress {
            label: request.label,
            street: request.street,
            city: request.city,
            state: request.state,
            postal_code: request.postal_code,
            country: request.country,
            is_default: request.is_default,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct AddressUpdateRequest {
    pub label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}

impl From<AddressUpdateRequest> for AddressUpdate {
    fn from(request: AddressUpdateRequest) -> Self {
        AddressUpdate {
            label: request.label,
            street: request.street,
            city: request.city,
            state: request.state,
            postal_code: request.postal_code,
            country: request.country,
            is_default: request.is_default,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub uuid: Uuid,
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AddressRecord> for AddressResponse {
    fn from(address: AddressRecord) -> Self {
        Self {
            uuid: address.uuid.into_uuid(),
            label: address.label,
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            is_default: address.is_default,
            created_at: address.created_at.to_string(),
            updated_at: address.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToWishlistRequest {
    pub product_uuid: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,

    /// Paise
    pub product_price: u64,

    pub product_image: Option<String>,
    pub added_at: String,
}

impl From<WishlistItem> for WishlistItemResponse {
    fn from(item: WishlistItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_price: item.product_price,
            product_image: item.product_image,
            added_at: item.added_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    pub items: Vec<WishlistItemResponse>,
    pub count: usize,
}

impl From<Vec<WishlistItem>> for WishlistResponse {
    fn from(items: Vec<WishlistItem>) -> Self {
        Self {
            count: items.len(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearedResponse {
    pub removed: u64,
}
