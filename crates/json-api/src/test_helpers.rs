//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, catcher::Catcher, prelude::*};

use tantika_app::{
    auth::{Actor, MockAuthService, SessionUuid},
    context::AppContext,
    domain::{
        artisans::{
            MockArtisansService,
            records::{
                ArtisanContact, ArtisanRecord, ArtisanStatus, ArtisanUuid, BankDetails,
                IdentityProof,
            },
        },
        notifications::MockNotificationsService,
        orders::{
            MockOrdersService,
            pricing::OrderTotals,
            records::{
                OrderCustomer, OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus,
                OrderUuid, PaymentMethod, PaymentStatus, ShippingAddress, StatusChange,
            },
        },
        payouts::{
            MockPayoutsService,
            fees::PayoutFees,
            records::{PayoutRecord, PayoutStatus, PayoutUuid},
        },
        products::{
            MockProductsService,
            records::{ApprovalStatus, ProductRecord, ProductStatus, ProductUuid},
        },
        reports::MockReportsService,
        users::{
            MockUsersService,
            records::{UserRecord, UserRole, UserUuid},
        },
        wishlists::MockWishlistsService,
    },
};

use crate::{
    envelope::catch_errors,
    extensions::*,
    state::{HttpSettings, State},
};

/// Mocked services; any call without an expectation fails the test.
pub(crate) struct MockApp {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) artisans: MockArtisansService,
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) payouts: MockPayoutsService,
    pub(crate) notifications: MockNotificationsService,
    pub(crate) wishlists: MockWishlistsService,
    pub(crate) reports: MockReportsService,
}

impl MockApp {
    pub(crate) fn new() -> Self {
        Self {
            auth: MockAuthService::new(),
            users: MockUsersService::new(),
            artisans: MockArtisansService::new(),
            products: MockProductsService::new(),
            orders: MockOrdersService::new(),
            payouts: MockPayoutsService::new(),
            notifications: MockNotificationsService::new(),
            wishlists: MockWishlistsService::new(),
            reports: MockReportsService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            artisans: Arc::new(self.artisans),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            payouts: Arc::new(self.payouts),
            notifications: Arc::new(self.notifications),
            wishlists: Arc::new(self.wishlists),
            reports: Arc::new(self.reports),
        };

        State::from_app_context(app, HttpSettings::default())
    }

    /// Serve `route` with `actor` already signed in.
    pub(crate) fn service(self, actor: Option<Actor>, route: Router) -> Service {
        let mut router = Router::new().hoop(inject(self.into_state()));

        if let Some(actor) = actor {
            router = router.hoop(InjectActor(actor));
        }

        Service::new(router.push(route)).catcher(Catcher::default().hoop(catch_errors))
    }
}

/// Sign a fixed actor in, skipping session lookup.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectActor(pub(crate) Actor);

#[handler]
impl InjectActor {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_actor(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn actor(role: UserRole, artisan: Option<ArtisanUuid>) -> Actor {
    Actor {
        user: UserUuid::new(),
        role,
        artisan,
        session: SessionUuid::new(),
    }
}

pub(crate) fn customer() -> Actor {
    actor(UserRole::User, None)
}

pub(crate) fn admin() -> Actor {
    actor(UserRole::Admin, None)
}

pub(crate) fn super_admin() -> Actor {
    actor(UserRole::SuperAdmin, None)
}

pub(crate) fn artisan() -> Actor {
    actor(UserRole::Artisan, Some(ArtisanUuid::new()))
}

pub(crate) fn pending_artisan() -> Actor {
    actor(UserRole::PendingArtisan, Some(ArtisanUuid::new()))
}

pub(crate) fn make_user(uuid: UserUuid, role: UserRole) -> UserRecord {
    UserRecord {
        uuid,
        name: "Meera Iyer".to_string(),
        email: "meera@example.com".to_string(),
        phone: Some("+919876543210".to_string()),
        role,
        is_active: true,
        artisan_uuid: None,
        last_login_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_artisan(uuid: ArtisanUuid, status: ArtisanStatus) -> ArtisanRecord {
    ArtisanRecord {
        uuid,
        user_uuid: UserUuid::new(),
        contact: ArtisanContact {
            name: "Lakshmi Devi".to_string(),
            email: "weaver@example.com".to_string(),
            phone: None,
        },
        business_name: "Pochampally Looms".to_string(),
        description: "Handwoven ikat textiles".to_string(),
        specialties: vec!["ikat".to_string()],
        city: Some("Pochampally".to_string()),
        state: Some("Telangana".to_string()),
        identity_proof: IdentityProof {
            kind: Some("aadhaar".to_string()),
            number: Some("1234-5678-9012".to_string()),
            verified: false,
            verified_by: None,
            verified_at: None,
        },
        bank_details: BankDetails {
            account_holder: Some("Pochampally Looms".to_string()),
            account_number: Some("123456789012".to_string()),
            ifsc: Some("SBIN0001234".to_string()),
            bank_name: Some("State Bank of India".to_string()),
            verified: false,
            verified_by: None,
            verified_at: None,
        },
        status,
        admin_notes: None,
        rejection_reason: None,
        suspension_reason: None,
        approved_at: None,
        approved_by: None,
        rejected_at: None,
        suspended_at: None,
        total_products: 0,
        total_sales: 0,
        total_revenue: 0,
        rating: 0.0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, artisan: ArtisanUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        artisan_uuid: artisan,
        artisan_name: "Pochampally Looms".to_string(),
        name: "Ikat stole".to_string(),
        description: "Handwoven cotton stole".to_string(),
        category: "Textiles".to_string(),
        price: 60_000,
        stock: 10,
        images: vec!["https://img.tantika.in/ikat-stole.jpg".to_string()],
        status: ProductStatus::Active,
        approval_status: ApprovalStatus::Approved,
        rejection_reason: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A pending cash-on-delivery order for one ₹600 product.
pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        order_number: "TNK-20260101-000001".to_string(),
        customer: OrderCustomer {
            user_uuid: None,
            name: "Meera Iyer".to_string(),
            email: "meera@example.com".to_string(),
            phone: "9876543210".to_string(),
        },
        shipping: ShippingAddress {
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560001".to_string(),
            country: "India".to_string(),
        },
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            product_uuid: ProductUuid::new(),
            artisan_uuid: ArtisanUuid::new(),
            product_name: "Ikat stole".to_string(),
            product_image: None,
            unit_price: 60_000,
            quantity: 1,
            subtotal: 60_000,
            payout_uuid: None,
        }],
        totals: OrderTotals {
            subtotal: 60_000,
            tax: 10_800,
            shipping: 0,
            total: 70_800,
        },
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: PaymentMethod::Cod,
        notes: None,
        cancellation_reason: None,
        cancelled_at: None,
        delivered_at: None,
        status_history: vec![StatusChange {
            status: OrderStatus::Pending,
            changed_by: None,
            reason: None,
            changed_at: Timestamp::UNIX_EPOCH,
        }],
        order_notes: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_payout(uuid: PayoutUuid, artisan: ArtisanUuid) -> PayoutRecord {
    PayoutRecord {
        uuid,
        artisan_uuid: artisan,
        artisan_name: "Pochampally Looms".to_string(),
        requested_amount: 60_000,
        amount: 60_000,
        fees: PayoutFees {
            processing_fee: 1_200,
            gst: 216,
            net_amount: 58_584,
        },
        bank_account_last4: "9012".to_string(),
        bank_ifsc: "SBIN0001234".to_string(),
        status: PayoutStatus::Pending,
        transaction_reference: None,
        failure_reason: None,
        processed_by: None,
        processed_at: None,
        order_lines: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
