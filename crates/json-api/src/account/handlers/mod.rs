//! Account Handlers

pub(crate) mod add_address;
pub(crate) mod add_to_wishlist;
pub(crate) mod addresses;
pub(crate) mod change_password;
pub(crate) mod clear_wishlist;
pub(crate) mod delete_address;
pub(crate) mod profile;
pub(crate) mod remove_from_wishlist;
pub(crate) mod update_address;
pub(crate) mod update_profile;
pub(crate) mod wishlist;
