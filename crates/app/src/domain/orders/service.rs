//! Orders service.

use std::collections::HashMap;

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
        orders::{
            data::{NewOrder, NewOrderNote, OrderFilter, StatusUpdate},
            errors::OrdersServiceError,
            lifecycle::Canceller,
            pricing::{OrderTotals, format_rupees, line_subtotal},
            records::{
                OrderItemRecord, OrderNote, OrderRecord, OrderStats, OrderStatus, OrderUuid,
                PaymentStatus,
            },
            repository::{OrderScope, PgOrdersRepository, PricedItem},
        },
        optional_text,
        products::{records::ProductUuid, repository::PgProductsRepository},
        required_text,
    },
    pagination::{Page, Paginated},
};

/// How much of an order a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderView {
    Full,

    /// Only the lines sold by this artisan.
    Lines(ArtisanUuid),
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products: PgProductsRepository,
    artisans: PgArtisansRepository,
    notifications: PgNotificationsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            artisans: PgArtisansRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }

    /// Lock each product, check it may be sold and take the stock.
    ///
    /// Products are locked in id order so concurrent checkouts of the same
    /// products cannot deadlock; the returned lines keep the checkout order.
    async fn reserve_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<Vec<PricedItem>, OrdersServiceError> {
        let mut locking: Vec<ProductUuid> = order.items.iter().map(|item| item.product).collect();
        locking.sort_unstable();

        let mut quantities: HashMap<ProductUuid, u64> = order
            .items
            .iter()
            .map(|item| (item.product, item.quantity))
            .collect();

        let mut priced: HashMap<ProductUuid, PricedItem> = HashMap::new();

        for uuid in locking {
            let quantity = quantities.remove(&uuid).unwrap_or_default();

            let product = self
                .products
                .lock_product(tx, uuid)
                .await
                .map_err(|error| match error {
                    sqlx::Error::RowNotFound => OrdersServiceError::ProductNotFound(uuid),
                    error => error.into(),
                })?;

            let artisan = self.artisans.get_artisan(tx, product.artisan_uuid).await?;

            if !product.is_listed() || artisan.status != ArtisanStatus::Approved {
                return Err(OrdersServiceError::ProductUnavailable(uuid));
            }

            if !self.products.reserve_stock(tx, uuid, quantity).await? {
                return Err(OrdersServiceError::InsufficientStock {
                    product: uuid,
                    available: product.stock,
                });
            }

            let subtotal = line_subtotal(product.price, quantity)
                .ok_or(OrdersServiceError::InvalidInput("order total is too large"))?;

            priced.insert(
                uuid,
                PricedItem {
                    product_uuid: uuid,
                    artisan_uuid: product.artisan_uuid,
                    product_image: product.primary_image().map(str::to_string),
                    product_name: product.name,
                    unit_price: product.price,
                    quantity,
                    subtotal,
                },
            );
        }

        Ok(order
            .items
            .iter()
            .filter_map(|item| priced.remove(&item.product))
            .collect())
    }

    /// Cancel a locked order, put its stock back and tell the other side.
    async fn cancel_locked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: Actor,
        order: &OrderRecord,
        canceller: Canceller,
        reason: &str,
    ) -> Result<(), OrdersServiceError> {
        order.status.cancel_by(canceller)?;

        if order.is_claimed_by_payout() {
            return Err(OrdersServiceError::ClaimedByPayout);
        }

        if self.repository.cancel_order(tx, order.uuid, reason).await? == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        // Delivered goods are with the customer, so only the sale is undone.
        if order.status == OrderStatus::Delivered {
            for (artisan, quantity, revenue) in sales_by_artisan(&order.items) {
                self.artisans
                    .reverse_sale(tx, artisan, quantity, revenue)
                    .await?;
            }
        } else {
            for item in &order.items {
                self.products
                    .restore_stock(tx, item.product_uuid, item.quantity)
                    .await?;
            }
        }

        self.repository
            .append_history(
                tx,
                order.uuid,
                OrderStatus::Cancelled,
                Some(actor.user),
                Some(reason),
            )
            .await?;

        let message = format!("Order {} was cancelled. Reason: {reason}", order.order_number);

        let mut notifications: Vec<NewNotification> = order
            .artisans()
            .into_iter()
            .map(|artisan| {
                NewNotification::new(
                    Recipient::Artisan(artisan),
                    NotificationKind::OrderCancelled,
                    "Order cancelled",
                    message.clone(),
                )
                .with_link(format!("/artisan/orders/{}", order.uuid))
            })
            .collect();

        match (canceller, order.customer.user_uuid) {
            (Canceller::Admin, Some(customer)) => notifications.push(
                NewNotification::new(
                    Recipient::User(customer),
                    NotificationKind::OrderCancelled,
                    "Order cancelled",
                    message,
                )
                .with_link(format!("/orders/{}", order.uuid)),
            ),
            (Canceller::Customer, _) => notifications.push(
                NewNotification::new(
                    Recipient::Admins,
                    NotificationKind::OrderCancelled,
                    "Order cancelled by customer",
                    message,
                )
                .with_link(format!("/admin/orders/{}", order.uuid)),
            ),
            (Canceller::Admin, None) => {}
        }

        self.notifications
            .create_notifications(tx, &notifications)
            .await?;

        Ok(())
    }
}

/// Admins see everything; customers their own orders; artisans only their lines.
fn order_view(actor: Actor, order: &OrderRecord) -> Option<OrderView> {
    if actor.is_admin() || order.customer.user_uuid == Some(actor.user) {
        return Some(OrderView::Full);
    }

    actor
        .acting_artisan()
        .filter(|artisan| order.items.iter().any(|item| item.artisan_uuid == *artisan))
        .map(OrderView::Lines)
}

fn list_scope(actor: Actor) -> OrderScope {
    if actor.is_admin() {
        OrderScope::default()
    } else if let Some(artisan) = actor.acting_artisan() {
        OrderScope {
            artisan: Some(artisan),
            ..OrderScope::default()
        }
    } else {
        OrderScope {
            customer: Some(actor.user),
            ..OrderScope::default()
        }
    }
}

/// Units and revenue per artisan, in first-seen order.
fn sales_by_artisan(items: &[OrderItemRecord]) -> Vec<(ArtisanUuid, u64, u64)> {
    let mut sales: Vec<(ArtisanUuid, u64, u64)> = Vec::new();

    for item in items {
        match sales.iter_mut().find(|(artisan, _, _)| *artisan == item.artisan_uuid) {
            Some((_, quantity, revenue)) => {
                *quantity = quantity.saturating_add(item.quantity);
                *revenue = revenue.saturating_add(item.subtotal);
            }
            None => sales.push((item.artisan_uuid, item.quantity, item.subtotal)),
        }
    }

    sales
}

fn new_order_notifications(order: &OrderRecord) -> Vec<NewNotification> {
    let mut notifications: Vec<NewNotification> = sales_by_artisan(&order.items)
        .into_iter()
        .map(|(artisan, quantity, revenue)| {
            NewNotification::new(
                Recipient::Artisan(artisan),
                NotificationKind::NewOrder,
                format!("New order {}", order.order_number),
                format!(
                    "{quantity} item(s) from your shop worth {} were ordered.",
                    format_rupees(revenue)
                ),
            )
            .with_link(format!("/artisan/orders/{}", order.uuid))
        })
        .collect();

    notifications.push(
        NewNotification::new(
            Recipient::Admins,
            NotificationKind::NewOrder,
            format!("New order {}", order.order_number),
            format!(
                "{} placed an order for {}.",
                order.customer.name,
                format_rupees(order.totals.total)
            ),
        )
        .with_link(format!("/admin/orders/{}", order.uuid)),
    );

    notifications
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        actor: Option<Actor>,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = order.validated()?;

        let mut tx = self.db.begin().await?;

        let items = self.reserve_items(&mut tx, &order).await?;

        let subtotal = items
            .iter()
            .try_fold(0_u64, |sum, item| sum.checked_add(item.subtotal))
            .ok_or(OrdersServiceError::InvalidInput("order total is too large"))?;

        let totals = OrderTotals::for_subtotal(subtotal)
            .ok_or(OrdersServiceError::InvalidInput("order total is too large"))?;

        let uuid = OrderUuid::new();
        let order_number = self.repository.next_order_number(&mut tx).await?;
        let customer = actor.map(|actor| actor.user);

        self.repository
            .create_order(
                &mut tx,
                uuid,
                &order_number,
                customer,
                &order,
                totals,
                order.payment_method.initial_payment_status(),
                &items,
            )
            .await?;

        self.repository
            .append_history(&mut tx, uuid, OrderStatus::Pending, customer, None)
            .await?;

        let created = self.repository.get_order(&mut tx, uuid).await?;

        self.notifications
            .create_notifications(&mut tx, &new_order_notifications(&created))
            .await?;

        tx.commit().await?;

        info!(
            order = %created.uuid,
            order_number = %created.order_number,
            total = created.totals.total,
            lines = created.items.len(),
            "order created"
        );

        Ok(created)
    }

    async fn get_order(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        match order_view(actor, &order) {
            Some(OrderView::Full) => Ok(order),
            Some(OrderView::Lines(artisan)) => Ok(order.restricted_to(artisan)),
            None => Err(OrdersServiceError::Forbidden),
        }
    }

    async fn list_orders(
        &self,
        actor: Actor,
        filter: OrderFilter,
        page: Page,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError> {
        let scope = list_scope(actor);
        let filter = OrderFilter {
            search: optional_text(filter.search.as_deref()),
            ..filter
        };

        let mut tx = self.db.begin().await?;

        let (orders, total) = self
            .repository
            .list_orders(&mut tx, scope, &filter, page)
            .await?;

        tx.commit().await?;

        let orders = Paginated::new(orders, total, page);

        Ok(match scope.artisan {
            Some(artisan) => orders.map(|order| order.restricted_to(artisan)),
            None => orders,
        })
    }

    async fn list_customer_orders(
        &self,
        actor: Actor,
        page: Page,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError> {
        let scope = OrderScope {
            customer: Some(actor.user),
            ..OrderScope::default()
        };

        let mut tx = self.db.begin().await?;

        let (orders, total) = self
            .repository
            .list_orders(&mut tx, scope, &OrderFilter::default(), page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(orders, total, page))
    }

    async fn update_order_status(
        &self,
        admin: Actor,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let reason = optional_text(update.reason.as_deref());

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if update.status == OrderStatus::Cancelled {
            let reason = reason.ok_or(OrdersServiceError::ReasonRequired)?;

            self.cancel_locked(&mut tx, admin, &current, Canceller::Admin, &reason)
                .await?;
        } else {
            current.status.can_advance_to(update.status)?;

            if self
                .repository
                .update_status(&mut tx, order, update.status)
                .await?
                == 0
            {
                return Err(OrdersServiceError::NotFound);
            }

            self.repository
                .append_history(
                    &mut tx,
                    order,
                    update.status,
                    Some(admin.user),
                    reason.as_deref(),
                )
                .await?;

            if update.status == OrderStatus::Delivered {
                for (artisan, quantity, revenue) in sales_by_artisan(&current.items) {
                    self.artisans
                        .record_sale(&mut tx, artisan, quantity, revenue)
                        .await?;
                }
            }

            if let Some(customer) = current.customer.user_uuid {
                self.notifications
                    .create_notification(
                        &mut tx,
                        &NewNotification::new(
                            Recipient::User(customer),
                            NotificationKind::OrderStatusChanged,
                            format!("Order {}", update.status),
                            format!("Order {} is now {}.", current.order_number, update.status),
                        )
                        .with_link(format!("/orders/{order}")),
                    )
                    .await?;
            }
        }

        let updated = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(
            %order,
            admin = %admin.user,
            from = %current.status,
            to = %updated.status,
            "order status updated"
        );

        Ok(updated)
    }

    async fn cancel_order(
        &self,
        actor: Actor,
        order: OrderUuid,
        reason: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let reason = required_text(&reason).ok_or(OrdersServiceError::ReasonRequired)?;

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        let canceller = if actor.is_admin() {
            Canceller::Admin
        } else if current.customer.user_uuid == Some(actor.user) {
            Canceller::Customer
        } else {
            return Err(OrdersServiceError::Forbidden);
        };

        self.cancel_locked(&mut tx, actor, &current, canceller, &reason)
            .await?;

        let cancelled = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(%order, actor = %actor.user, "order cancelled");

        Ok(cancelled)
    }

    async fn update_payment_status(
        &self,
        admin: Actor,
        order: OrderUuid,
        payment_status: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if payment_status != PaymentStatus::Paid && current.is_claimed_by_payout() {
            return Err(OrdersServiceError::ClaimedByPayout);
        }

        self.repository
            .update_payment_status(&mut tx, order, payment_status)
            .await?;

        if let Some(customer) = current.customer.user_uuid {
            self.notifications
                .create_notification(
                    &mut tx,
                    &NewNotification::new(
                        Recipient::User(customer),
                        NotificationKind::PaymentStatusChanged,
                        format!("Payment {payment_status}"),
                        format!(
                            "Payment for order {} is now {payment_status}.",
                            current.order_number
                        ),
                    )
                    .with_link(format!("/orders/{order}")),
                )
                .await?;
        }

        let updated = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(%order, admin = %admin.user, %payment_status, "payment status updated");

        Ok(updated)
    }

    async fn add_order_note(
        &self,
        admin: Actor,
        order: OrderUuid,
        note: NewOrderNote,
    ) -> Result<OrderNote, OrdersServiceError> {
        let body = required_text(&note.body)
            .ok_or(OrdersServiceError::InvalidInput("note body is required"))?;

        let mut tx = self.db.begin().await?;

        self.repository.lock_order(&mut tx, order).await?;

        let note = self
            .repository
            .create_note(&mut tx, order, note.kind, admin.user, &body)
            .await?;

        tx.commit().await?;

        Ok(note)
    }

    async fn order_stats(&self) -> Result<OrderStats, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.order_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order, taking stock for every line in one transaction.
    ///
    /// Guests may check out; a signed-in customer's order is linked to them.
    async fn create_order(
        &self,
        actor: Option<Actor>,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order the actor may see. Artisans get only their own lines.
    async fn get_order(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders visible to the actor, newest first.
    async fn list_orders(
        &self,
        actor: Actor,
        filter: OrderFilter,
        page: Page,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError>;

    /// Orders the actor placed as a customer, whatever their role.
    async fn list_customer_orders(
        &self,
        actor: Actor,
        page: Page,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError>;

    /// Move an order along the fulfilment path. `cancelled` needs a reason.
    async fn update_order_status(
        &self,
        admin: Actor,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn cancel_order(
        &self,
        actor: Actor,
        order: OrderUuid,
        reason: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn update_payment_status(
        &self,
        admin: Actor,
        order: OrderUuid,
        payment_status: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn add_order_note(
        &self,
        admin: Actor,
        order: OrderUuid,
        note: NewOrderNote,
    ) -> Result<OrderNote, OrdersServiceError>;

    async fn order_stats(&self) -> Result<OrderStats, OrdersServiceError>;
}
