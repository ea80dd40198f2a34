//! App Router

use salvo::Router;

use crate::{
    account, artisans,
    auth::{self, middleware, roles},
    notifications, orders, payouts, products, reports, users,
};

/// Everything served under `/api`.
///
/// Static segments are pushed ahead of their `{uuid}` siblings so paths like
/// `products/stats` never reach a uuid path parameter.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(auth_routes())
        .push(admin_routes())
        .push(artisan_routes())
        .push(product_routes())
        .push(order_routes())
        .push(notification_routes())
        .push(account_routes())
        .push(user_routes())
}

fn auth_routes() -> Router {
    Router::with_path("auth")
        .push(
            Router::with_path("register")
                .post(auth::register::handler)
                .push(Router::with_path("artisan").post(auth::register_artisan::handler)),
        )
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(middleware::required)
                .push(Router::with_path("logout").get(auth::logout::handler))
                .push(Router::with_path("me").get(auth::me::handler)),
        )
}

fn admin_routes() -> Router {
    Router::with_path("admin")
        .hoop(middleware::required)
        .hoop(roles::admin)
        .push(
            Router::with_path("artisans")
                .get(artisans::index::handler)
                .push(Router::with_path("pending").get(artisans::pending::handler))
                .push(Router::with_path("approved").get(artisans::approved::handler))
                .push(Router::with_path("stats").get(artisans::stats::handler))
                .push(Router::with_path("bulk-approve").post(artisans::bulk_approve::handler))
                .push(Router::with_path("bulk-reject").post(artisans::bulk_reject::handler))
                .push(
                    Router::with_path("{artisan}")
                        .get(artisans::get::handler)
                        .put(artisans::update::handler)
                        .push(Router::with_path("approve").put(artisans::approve::handler))
                        .push(Router::with_path("reject").put(artisans::reject::handler))
                        .push(Router::with_path("suspend").put(artisans::suspend::handler))
                        .push(Router::with_path("reactivate").put(artisans::reactivate::handler))
                        .push(Router::with_path("verify-bank").put(artisans::verify_bank::handler)),
                ),
        )
        .push(
            Router::with_path("payouts")
                .get(payouts::admin_index::handler)
                .push(Router::with_path("{payout}/status").put(payouts::update_status::handler)),
        )
        .push(Router::with_path("orders/stats").get(orders::stats::handler))
}

fn artisan_routes() -> Router {
    Router::with_path("artisan")
        .hoop(middleware::required)
        .hoop(roles::artisan)
        .push(
            Router::with_path("profile")
                .get(artisans::show_profile::handler)
                .put(artisans::update_profile::handler),
        )
        .push(
            Router::with_path("bank-details")
                .get(artisans::show_bank_details::handler)
                .put(artisans::update_bank_details::handler),
        )
        .push(
            Router::with_path("products")
                .get(products::artisan_index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        // Order listing is scoped to the acting artisan by the service.
        .push(Router::with_path("orders").get(orders::index::handler))
        .push(Router::with_path("dashboard").get(reports::artisan_dashboard::handler))
        .push(Router::with_path("earnings").get(reports::artisan_earnings::handler))
        .push(
            Router::with_path("payouts")
                .get(payouts::index::handler)
                .push(Router::with_path("balance").get(payouts::balance::handler))
                .push(Router::with_path("request").post(payouts::request::handler))
                .push(Router::with_path("{payout}/cancel").put(payouts::cancel::handler)),
        )
        .push(Router::with_path("notifications").get(notifications::index::handler))
}

fn product_routes() -> Router {
    Router::with_path("products")
        .push(
            Router::with_path("stats")
                .hoop(middleware::required)
                .hoop(roles::admin)
                .get(products::stats::handler),
        )
        .push(
            Router::new()
                .hoop(middleware::optional)
                .get(products::index::handler)
                .push(Router::with_path("categories").get(products::categories::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(middleware::required)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(
                            Router::with_path("review")
                                .hoop(roles::admin)
                                .put(products::review::handler),
                        ),
                ),
        )
}

fn order_routes() -> Router {
    Router::with_path("orders")
        .push(
            Router::new()
                .hoop(middleware::optional)
                .post(orders::create::handler),
        )
        .push(
            Router::new()
                .hoop(middleware::required)
                .get(orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("cancel").put(orders::cancel::handler))
                        .push(
                            Router::new()
                                .hoop(roles::admin)
                                .push(Router::with_path("status").put(orders::update_status::handler))
                                .push(
                                    Router::with_path("payment").put(orders::update_payment::handler),
                                )
                                .push(Router::with_path("notes").post(orders::add_note::handler)),
                        ),
                ),
        )
}

fn notification_routes() -> Router {
    Router::with_path("notifications")
        .hoop(middleware::required)
        .get(notifications::index::handler)
        .push(Router::with_path("unread-count").get(notifications::unread_count::handler))
        .push(Router::with_path("read-all").put(notifications::read_all::handler))
        .push(Router::with_path("{notification}/read").put(notifications::read::handler))
}

/// Self-service routes for any signed-in user.
fn account_routes() -> Router {
    Router::with_path("usernorms")
        .hoop(middleware::required)
        .push(
            Router::with_path("profile")
                .get(account::profile::handler)
                .put(account::update_profile::handler),
        )
        .push(Router::with_path("password").put(account::change_password::handler))
        .push(Router::with_path("dashboard").get(reports::customer_dashboard::handler))
        .push(Router::with_path("orders").get(orders::customer_index::handler))
        .push(
            Router::with_path("wishlist")
                .get(account::wishlist::handler)
                .post(account::add_to_wishlist::handler)
                .delete(account::clear_wishlist::handler)
                .push(Router::with_path("{product}").delete(account::remove_from_wishlist::handler)),
        )
        .push(
            Router::with_path("addresses")
                .get(account::addresses::handler)
                .post(account::add_address::handler)
                .push(
                    Router::with_path("{address}")
                        .put(account::update_address::handler)
                        .delete(account::delete_address::handler),
                ),
        )
}

fn user_routes() -> Router {
    Router::with_path("users")
        .hoop(middleware::required)
        .hoop(roles::admin)
        .get(users::index::handler)
        .push(Router::with_path("stats").get(users::stats::handler))
        .push(Router::with_path("bulk-update").post(users::bulk_update::handler))
        .push(
            Router::with_path("{user}")
                .get(users::get::handler)
                .put(users::update::handler)
                .delete(users::delete::handler)
                .push(Router::with_path("status").patch(users::set_status::handler)),
        )
}
