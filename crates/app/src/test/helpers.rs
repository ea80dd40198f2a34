//! Test Helpers

use testresult::TestResult;

use crate::{
    auth::{
        Actor, ArtisanApplication, AuthService, AuthServiceError, Credentials, IssuedSession,
        NewAccount,
    },
    domain::{
        artisans::{
            ArtisansService,
            data::{BankDetailsUpdate, NewArtisanProfile},
        },
        orders::{
            OrdersService,
            data::{NewOrder, NewOrderCustomer, NewOrderItem, StatusUpdate},
            records::{OrderRecord, OrderStatus, PaymentMethod, PaymentStatus},
        },
        products::{
            ProductsService,
            data::{NewProduct, ProductReview},
            records::{ProductRecord, ProductUuid},
        },
        users::data::NewAddress,
    },
    test::TestContext,
};

pub(crate) const PASSWORD: &str = "correct-horse-battery";

pub(crate) fn account(email: &str) -> NewAccount {
    NewAccount {
        name: "Test Person".to_string(),
        email: email.to_string(),
        phone: None,
        password: PASSWORD.to_string(),
    }
}

pub(crate) fn artisan_application(email: &str) -> ArtisanApplication {
    ArtisanApplication {
        account: account(email),
        profile: NewArtisanProfile {
            business_name: "Pochampally Looms".to_string(),
            description: Some("Handwoven ikat textiles".to_string()),
            specialties: vec!["ikat".to_string(), "handloom".to_string()],
            city: Some("Pochampally".to_string()),
            state: Some("Telangana".to_string()),
            identity_proof_kind: "aadhaar".to_string(),
            identity_proof_number: "1234-5678-9012".to_string(),
        },
    }
}

pub(crate) fn bank_details() -> BankDetailsUpdate {
    BankDetailsUpdate {
        account_holder: "Pochampally Looms".to_string(),
        account_number: "123456789012".to_string(),
        ifsc: "SBIN0001234".to_string(),
        bank_name: "State Bank of India".to_string(),
    }
}

pub(crate) fn address(street: &str) -> NewAddress {
    NewAddress {
        label: Some("Home".to_string()),
        street: street.to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        postal_code: "560001".to_string(),
        country: None,
        is_default: false,
    }
}

pub(crate) fn new_product(name: &str, price: u64, stock: u64) -> NewProduct {
    NewProduct {
        artisan: None,
        name: name.to_string(),
        description: format!("{name}, made by hand"),
        category: "Textiles".to_string(),
        price,
        stock,
        images: vec![format!(
            "https://img.tantika.in/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        )],
        draft: false,
    }
}

/// A cash-on-delivery checkout for a single product.
pub(crate) fn new_order(product: ProductUuid, quantity: u64) -> NewOrder {
    NewOrder {
        customer: NewOrderCustomer {
            name: "Meera Iyer".to_string(),
            email: "meera@example.com".to_string(),
            phone: "9876543210".to_string(),
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560001".to_string(),
            country: None,
        },
        items: vec![NewOrderItem { product, quantity }],
        payment_method: PaymentMethod::Cod,
        notes: None,
    }
}

pub(crate) async fn register_customer_session(
    ctx: &TestContext,
    email: &str,
) -> Result<IssuedSession, AuthServiceError> {
    ctx.auth.register_customer(account(email)).await
}

pub(crate) async fn register_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<Actor, AuthServiceError> {
    let issued = register_customer_session(ctx, email).await?;

    ctx.auth.authenticate(&issued.token).await
}

pub(crate) async fn login(
    ctx: &TestContext,
    email: &str,
) -> Result<IssuedSession, AuthServiceError> {
    ctx.auth
        .login(Credentials {
            email: email.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
}

pub(crate) async fn create_admin(ctx: &TestContext, email: &str) -> Result<Actor, AuthServiceError> {
    ctx.auth.create_admin(account(email), false).await?;

    let issued = login(ctx, email).await?;

    ctx.auth.authenticate(&issued.token).await
}

/// A shared admin that approves fixture products.
async fn reviewer(ctx: &TestContext) -> Result<Actor, AuthServiceError> {
    const EMAIL: &str = "reviewer@tantika.in";

    match login(ctx, EMAIL).await {
        Ok(issued) => ctx.auth.authenticate(&issued.token).await,
        Err(AuthServiceError::InvalidCredentials) => create_admin(ctx, EMAIL).await,
        Err(error) => Err(error),
    }
}

/// Register an artisan application and act as the pending applicant.
pub(crate) async fn apply_as_artisan(
    ctx: &TestContext,
    email: &str,
) -> Result<Actor, AuthServiceError> {
    let issued = ctx.auth.register_artisan(artisan_application(email)).await?;

    ctx.auth.authenticate(&issued.token).await
}

/// An approved artisan plus the session token it signed in with.
pub(crate) async fn approved_artisan_with_token(
    ctx: &TestContext,
    admin: Actor,
    email: &str,
) -> TestResult<(Actor, String)> {
    let issued = ctx.auth.register_artisan(artisan_application(email)).await?;
    let artisan = issued.user.artisan_uuid.ok_or("applicant has no artisan")?;

    ctx.artisans.approve(admin, artisan, None).await?;

    // Role is read per request, so the same token now acts as an artisan.
    let actor = ctx.auth.authenticate(&issued.token).await?;

    Ok((actor, issued.token))
}

pub(crate) async fn approved_artisan(
    ctx: &TestContext,
    admin: Actor,
    email: &str,
) -> TestResult<Actor> {
    let (actor, _) = approved_artisan_with_token(ctx, admin, email).await?;

    Ok(actor)
}

/// An approved artisan whose bank details an admin has verified.
pub(crate) async fn verified_artisan(
    ctx: &TestContext,
    admin: Actor,
    email: &str,
) -> TestResult<Actor> {
    let actor = approved_artisan(ctx, admin, email).await?;
    let artisan = actor.artisan.ok_or("artisan actor has no artisan")?;

    ctx.artisans
        .update_bank_details(actor, bank_details())
        .await?;
    ctx.artisans.verify_bank_details(admin, artisan).await?;

    Ok(actor)
}

/// Create a product as `artisan` and approve it so it is publicly listed.
pub(crate) async fn create_product(
    ctx: &TestContext,
    artisan: Actor,
    name: &str,
    price: u64,
    stock: u64,
) -> TestResult<ProductRecord> {
    let product = ctx
        .products
        .create_product(artisan, new_product(name, price, stock))
        .await?;

    let reviewer = reviewer(ctx).await?;

    Ok(ctx
        .products
        .review_product(reviewer, product.uuid, ProductReview::Approve)
        .await?)
}

pub(crate) async fn place_order(
    ctx: &TestContext,
    customer: Option<Actor>,
    product: ProductUuid,
    quantity: u64,
) -> TestResult<OrderRecord> {
    Ok(ctx
        .orders
        .create_order(customer, new_order(product, quantity))
        .await?)
}

/// A guest order that has been delivered and paid, so its lines count
/// towards the artisan's balance.
pub(crate) async fn settled_order(
    ctx: &TestContext,
    admin: Actor,
    product: ProductUuid,
    quantity: u64,
) -> TestResult<OrderRecord> {
    let order = place_order(ctx, None, product, quantity).await?;

    ctx.orders
        .update_order_status(
            admin,
            order.uuid,
            StatusUpdate {
                status: OrderStatus::Delivered,
                reason: None,
            },
        )
        .await?;

    Ok(ctx
        .orders
        .update_payment_status(admin, order.uuid, PaymentStatus::Paid)
        .await?)
}
