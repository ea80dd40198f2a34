//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::Actor,
    database::Db,
    domain::{
        artisans::{
            records::{ArtisanStatus, ArtisanUuid},
            repository::PgArtisansRepository,
        },
        notifications::{
            data::NewNotification,
            records::{NotificationKind, Recipient},
            repository::PgNotificationsRepository,
        },
        products::{
            data::{NewProduct, ProductFilter, ProductReview, ProductUpdate},
            errors::ProductsServiceError,
            records::{
                ApprovalStatus, CategoryCount, ProductRecord, ProductStats, ProductStatus,
                ProductUuid,
            },
            repository::PgProductsRepository,
        },
        required_text,
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    artisans: PgArtisansRepository,
    notifications: PgNotificationsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            artisans: PgArtisansRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }

    /// Lock the product and check the actor may change it.
    async fn lock_owned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = self.repository.lock_product(tx, product).await?;

        if !can_manage(actor, &product) {
            return Err(ProductsServiceError::Forbidden);
        }

        Ok(product)
    }
}

/// Admins manage every product; artisans only their own.
fn can_manage(actor: Actor, product: &ProductRecord) -> bool {
    actor.is_admin() || actor.acting_artisan() == Some(product.artisan_uuid)
}

/// Approval an owner's edit leaves behind. Admin edits keep the current review.
fn approval_after_edit(
    actor: Actor,
    current: &ProductRecord,
    update: &ProductUpdate,
) -> ApprovalStatus {
    if !actor.is_admin()
        && current.approval_status != ApprovalStatus::Pending
        && update.requires_review(current)
    {
        ApprovalStatus::Pending
    } else {
        current.approval_status
    }
}

fn artisan_not_found(error: sqlx::Error) -> ProductsServiceError {
    match error {
        sqlx::Error::RowNotFound => ProductsServiceError::ArtisanNotFound,
        error => error.into(),
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError> {
        let filter = filter.validated()?;

        let mut tx = self.db.begin().await?;

        let (products, total) = self
            .repository
            .list_products(&mut tx, &filter, true, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(products, total, page))
    }

    async fn get_product(
        &self,
        actor: Option<Actor>,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;
        let artisan = self.artisans.get_artisan(&mut tx, product.artisan_uuid).await?;

        tx.commit().await?;

        let visible = product.is_listed() && artisan.status == ArtisanStatus::Approved;

        if visible || actor.is_some_and(|actor| can_manage(actor, &product)) {
            Ok(product)
        } else {
            Err(ProductsServiceError::NotFound)
        }
    }

    async fn create_product(
        &self,
        actor: Actor,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.validated()?;

        let (artisan, approval_status) = if actor.is_admin() {
            (
                product.artisan.ok_or(ProductsServiceError::ArtisanRequired)?,
                ApprovalStatus::Approved,
            )
        } else {
            (
                actor
                    .acting_artisan()
                    .ok_or(ProductsServiceError::ArtisanNotApproved)?,
                ApprovalStatus::Pending,
            )
        };

        let mut tx = self.db.begin().await?;

        let owner = self
            .artisans
            .lock_artisan(&mut tx, artisan)
            .await
            .map_err(artisan_not_found)?;

        if owner.status != ArtisanStatus::Approved {
            return Err(ProductsServiceError::ArtisanNotApproved);
        }

        let status = if product.draft {
            ProductStatus::Draft
        } else {
            ProductStatus::for_stock(product.stock)
        };

        let created = self
            .repository
            .create_product(
                &mut tx,
                ProductUuid::new(),
                artisan,
                &product,
                status,
                approval_status,
            )
            .await?;

        self.artisans
            .adjust_product_count(&mut tx, artisan, 1)
            .await?;

        tx.commit().await?;

        info!(
            product = %created.uuid,
            %artisan,
            approval = %created.approval_status,
            "product created"
        );

        Ok(created)
    }

    async fn update_product(
        &self,
        actor: Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let current = self.lock_owned(&mut tx, actor, product).await?;

        let stock = update.stock.unwrap_or(current.stock);
        let status = current.status.after_write(update.draft, stock);
        let approval_status = approval_after_edit(actor, &current, &update);

        self.repository
            .update_product(&mut tx, product, &update, status, approval_status)
            .await?;

        let updated = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        if approval_status != current.approval_status {
            info!(%product, "product edit sent back for review");
        }

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.lock_owned(&mut tx, actor, product).await?;

        if self.repository.delete_product(&mut tx, product).await? == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        self.artisans
            .adjust_product_count(&mut tx, current.artisan_uuid, -1)
            .await?;

        tx.commit().await?;

        info!(%product, actor = %actor.user, "product deleted");

        Ok(())
    }

    async fn review_product(
        &self,
        admin: Actor,
        product: ProductUuid,
        review: ProductReview,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let (approval_status, reason) = match review {
            ProductReview::Approve => (ApprovalStatus::Approved, None),
            ProductReview::Reject { reason } => (
                ApprovalStatus::Rejected,
                Some(required_text(&reason).ok_or(ProductsServiceError::ReasonRequired)?),
            ),
        };

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        self.repository
            .review_product(&mut tx, product, approval_status, reason.as_deref())
            .await?;

        let message = match &reason {
            Some(reason) => format!("{} was not approved. Reason: {reason}", current.name),
            None => format!("{} is approved and visible to customers.", current.name),
        };

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification::new(
                    Recipient::Artisan(current.artisan_uuid),
                    NotificationKind::ProductReviewed,
                    format!("Product {approval_status}"),
                    message,
                )
                .with_link(format!("/artisan/products/{product}")),
            )
            .await?;

        let reviewed = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(%product, admin = %admin.user, approval = %approval_status, "product reviewed");

        Ok(reviewed)
    }

    async fn categories(&self) -> Result<Vec<CategoryCount>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn list_artisan_products(
        &self,
        artisan: ArtisanUuid,
        page: Page,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError> {
        let filter = ProductFilter {
            artisan: Some(artisan),
            ..ProductFilter::default()
        };

        let mut tx = self.db.begin().await?;

        let (products, total) = self
            .repository
            .list_products(&mut tx, &filter, false, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(products, total, page))
    }

    async fn product_stats(&self) -> Result<ProductStats, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.product_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// The public catalogue: approved, non-draft products of approved artisans.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product. Unlisted products are visible only to their owner and admins.
    async fn get_product(
        &self,
        actor: Option<Actor>,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Artisan-created products wait for review; admin-created ones are approved.
    async fn create_product(
        &self,
        actor: Actor,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    async fn update_product(
        &self,
        actor: Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product.
    async fn delete_product(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    async fn review_product(
        &self,
        admin: Actor,
        product: ProductUuid,
        review: ProductReview,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Categories of listed products with their product counts.
    async fn categories(&self) -> Result<Vec<CategoryCount>, ProductsServiceError>;

    /// Every live product of one artisan, whatever its review state.
    async fn list_artisan_products(
        &self,
        artisan: ArtisanUuid,
        page: Page,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError>;

    async fn product_stats(&self) -> Result<ProductStats, ProductsServiceError>;
}
