//! Orders Data

use crate::domain::{
    optional_text,
    orders::{
        errors::OrdersServiceError,
        records::{OrderNoteKind, OrderStatus, PaymentMethod, PaymentStatus},
    },
    products::records::ProductUuid,
    required_text,
};

/// Checkout contact and shipping details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrderCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: Option<String>,
}

impl NewOrderCustomer {
    pub(crate) fn validated(self) -> Result<Self, OrdersServiceError> {
        let required = |value: &str, message| {
            required_text(value).ok_or(OrdersServiceError::InvalidInput(message))
        };

        let email = required(&self.email, "customer email is required")?.to_lowercase();

        if !email.contains('@') {
            return Err(OrdersServiceError::InvalidInput("customer email is invalid"));
        }

        Ok(Self {
            name: required(&self.name, "customer name is required")?,
            email,
            phone: required(&self.phone, "customer phone is required")?,
            street: required(&self.street, "street is required")?,
            city: required(&self.city, "city is required")?,
            state: required(&self.state, "state is required")?,
            postal_code: required(&self.postal_code, "postal code is required")?,
            country: optional_text(self.country.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u64,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: NewOrderCustomer,
    pub items: Vec<NewOrderItem>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl NewOrder {
    /// Validate the checkout and merge repeated products into one line.
    pub(crate) fn validated(self) -> Result<Self, OrdersServiceError> {
        if self.items.is_empty() {
            return Err(OrdersServiceError::InvalidInput(
                "an order needs at least one item",
            ));
        }

        let mut items: Vec<NewOrderItem> = Vec::with_capacity(self.items.len());

        for item in self.items {
            if item.quantity == 0 {
                return Err(OrdersServiceError::InvalidInput(
                    "quantity must be at least one",
                ));
            }

            match items.iter_mut().find(|line| line.product == item.product) {
                Some(line) => {
                    line.quantity = line
                        .quantity
                        .checked_add(item.quantity)
                        .ok_or(OrdersServiceError::InvalidInput("quantity is too large"))?;
                }
                None => items.push(item),
            }
        }

        if items.iter().any(|line| i64::try_from(line.quantity).is_err()) {
            return Err(OrdersServiceError::InvalidInput("quantity is too large"));
        }

        Ok(Self {
            customer: self.customer.validated()?,
            items,
            payment_method: self.payment_method,
            notes: optional_text(self.notes.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,

    /// Matches order number, customer name or email.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderNote {
    pub kind: OrderNoteKind,
    pub body: String,
}
