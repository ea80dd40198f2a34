//! Wishlists service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Actor,
    database::Db,
    domain::{
        artisans::{records::ArtisanStatus, repository::PgArtisansRepository},
        products::{records::ProductUuid, repository::PgProductsRepository},
        wishlists::{
            errors::WishlistsServiceError, records::WishlistItem,
            repository::PgWishlistsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistsService {
    db: Db,
    repository: PgWishlistsRepository,
    products: PgProductsRepository,
    artisans: PgArtisansRepository,
}

impl PgWishlistsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWishlistsRepository::new(),
            products: PgProductsRepository::new(),
            artisans: PgArtisansRepository::new(),
        }
    }
}

fn product_not_found(error: sqlx::Error) -> WishlistsServiceError {
    match error {
        sqlx::Error::RowNotFound => WishlistsServiceError::ProductNotFound,
        error => error.into(),
    }
}

#[async_trait]
impl WishlistsService for PgWishlistsService {
    async fn list(&self, actor: Actor) -> Result<Vec<WishlistItem>, WishlistsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_items(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<WishlistItem, WishlistsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product(&mut tx, product)
            .await
            .map_err(product_not_found)?;

        let artisan = self
            .artisans
            .get_artisan(&mut tx, product.artisan_uuid)
            .await
            .map_err(product_not_found)?;

        if !product.is_listed() || artisan.status != ArtisanStatus::Approved {
            return Err(WishlistsServiceError::ProductNotFound);
        }

        let item = self
            .repository
            .add_item(&mut tx, actor.user, &product)
            .await?;

        tx.commit().await?;

        info!(user = %actor.user, product = %product.uuid, "wishlist item added");

        Ok(item)
    }

    async fn remove(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .repository
            .remove_item(&mut tx, actor.user, product)
            .await?
            == 0
        {
            return Err(WishlistsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, actor: Actor) -> Result<u64, WishlistsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.repository.clear_items(&mut tx, actor.user).await?;

        tx.commit().await?;

        info!(user = %actor.user, removed, "wishlist cleared");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// Saved products, most recently added first.
    async fn list(&self, actor: Actor) -> Result<Vec<WishlistItem>, WishlistsServiceError>;

    /// Save a listed product. Hidden products are reported as not found.
    async fn add(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<WishlistItem, WishlistsServiceError>;

    async fn remove(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError>;

    /// Empty the wishlist, returning how many items were removed.
    async fn clear(&self, actor: Actor) -> Result<u64, WishlistsServiceError>;
}
