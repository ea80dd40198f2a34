//! Artisan Handlers

pub(crate) mod approve;
pub(crate) mod approved;
pub(crate) mod bulk_approve;
pub(crate) mod bulk_reject;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod pending;
pub(crate) mod reactivate;
pub(crate) mod reject;
pub(crate) mod show_bank_details;
pub(crate) mod show_profile;
pub(crate) mod stats;
pub(crate) mod suspend;
pub(crate) mod update;
pub(crate) mod update_bank_details;
pub(crate) mod update_profile;
pub(crate) mod verify_bank;

#[cfg(test)]
mod tests {
    use tantika_app::domain::artisans::records::{ArtisanRecord, ArtisanStatus, ArtisanUuid};

    use crate::test_helpers::make_artisan;

    pub(super) fn artisan_with(uuid: ArtisanUuid, status: ArtisanStatus) -> ArtisanRecord {
        make_artisan(uuid, status).masked()
    }
}
