//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::{
    orders::{
        data::{NewOrder, NewOrderCustomer, NewOrderItem},
        records::PaymentMethod,
    },
    products::records::ProductUuid,
};

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    observability::record_order_created,
    orders::OrderResponse,
    state::State,
};

/// Contact and shipping details collected at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,

    /// Defaults to India
    #[serde(default)]
    pub country: Option<String>,
}

impl From<CheckoutCustomer> for NewOrderCustomer {
    fn from(customer: CheckoutCustomer) -> Self {
        NewOrderCustomer {
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            street: customer.street,
            city: customer.city,
            state: customer.state,
            postal_code: customer.postal_code,
            country: customer.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutItem {
    pub product_uuid: Uuid,
    pub quantity: u64,
}

/// Create Order Request
///
/// Either `items`, or the single-product shorthand `product_uuid` with an
/// optional `quantity`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub customer: CheckoutCustomer,

    #[serde(default)]
    pub items: Vec<CheckoutItem>,

    #[serde(default)]
    pub product_uuid: Option<Uuid>,

    #[serde(default)]
    pub quantity: Option<u64>,

    /// `cod`, `upi`, `card` or `net_banking`
    #[serde(default = "default_payment_method")]
    pub payment_method: String,

    #[serde(default)]
    pub notes: Option<String>,
}

fn default_payment_method() -> String {
    PaymentMethod::Cod.to_string()
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = ApiError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let mut items: Vec<NewOrderItem> = request
            .items
            .into_iter()
            .map(|item| NewOrderItem {
                product: ProductUuid::from_uuid(item.product_uuid),
                quantity: item.quantity,
            })
            .collect();

        if let Some(product) = request.product_uuid {
            items.push(NewOrderItem {
                product: ProductUuid::from_uuid(product),
                quantity: request.quantity.unwrap_or(1),
            });
        }

        Ok(NewOrder {
            customer: request.customer.into(),
            items,
            payment_method: request.payment_method.parse()?,
            notes: request.notes,
        })
    }
}

/// Create Order Handler
///
/// Open to guests. A signed-in customer's order is linked to their account.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid checkout or insufficient stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(name = "orders.create", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = NewOrder::try_from(json.into_inner())?;

    let order = state.app.orders.create_order(depot.actor(), order).await?;

    record_order_created();

    res.add_header(LOCATION, format!("/api/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(OrderResponse::from(order)).message("Order placed successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, customer, make_order},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").post(handler)
    }

    fn checkout() -> serde_json::Value {
        json!({
            "name": "Meera Iyer",
            "email": "meera@example.com",
            "phone": "9876543210",
            "street": "12 MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "postal_code": "560001",
        })
    }

    #[tokio::test]
    async fn test_guest_checkout_with_single_product_shorthand() -> TestResult {
        let product = Uuid::now_v7();
        let uuid = OrderUuid::new();
        let mut app = MockApp::new();

        app.orders
            .expect_create_order()
            .once()
            .withf(move |actor, order| {
                actor.is_none()
                    && order.items
                        == vec![NewOrderItem {
                            product: ProductUuid::from_uuid(product),
                            quantity: 1,
                        }]
                    && order.payment_method == PaymentMethod::Cod
                    && order.customer.city == "Bengaluru"
            })
            .return_once(move |_, _| Ok(make_order(uuid)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "customer": checkout(), "product_uuid": product }))
            .send(&app.service(None, route()))
            .await;

        let body: ApiResponse<OrderResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/orders/{uuid}").as_str()));
        assert_eq!(body.data.order_number, "TNK-20260101-000001");
        assert_eq!(body.data.totals.total, 70_800);
        assert_eq!(body.message.as_deref(), Some("Order placed successfully"));

        Ok(())
    }

    #[tokio::test]
    async fn test_signed_in_customer_is_linked() -> TestResult {
        let buyer = customer();
        let mut app = MockApp::new();

        app.orders
            .expect_create_order()
            .once()
            .withf(move |actor, order| {
                *actor == Some(buyer)
                    && order.items.len() == 2
                    && order.payment_method == PaymentMethod::Upi
            })
            .return_once(|_, _| Ok(make_order(OrderUuid::new())));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "customer": checkout(),
                "items": [
                    { "product_uuid": Uuid::now_v7(), "quantity": 2 },
                    { "product_uuid": Uuid::now_v7(), "quantity": 1 },
                ],
                "payment_method": "upi",
            }))
            .send(&app.service(Some(buyer), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_payment_method_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.orders.expect_create_order().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "customer": checkout(),
                "product_uuid": Uuid::now_v7(),
                "payment_method": "barter",
            }))
            .send(&app.service(None, route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "unknown payment method `barter`");

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_400() -> TestResult {
        let product = ProductUuid::new();
        let mut app = MockApp::new();

        app.orders
            .expect_create_order()
            .once()
            .return_once(move |_, _| {
                Err(OrdersServiceError::InsufficientStock {
                    product,
                    available: 0,
                })
            });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "customer": checkout(),
                "product_uuid": product.into_uuid(),
                "quantity": 3,
            }))
            .send(&app.service(None, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
