//! Order pricing in paise.

/// GST charged on the goods subtotal.
pub const TAX_PERCENT: u64 = 18;

/// Orders above ₹500 ship free.
pub const FREE_SHIPPING_ABOVE: u64 = 50_000;

/// ₹40 flat shipping otherwise.
pub const FLAT_SHIPPING: u64 = 4_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
}

impl OrderTotals {
    /// Price an order from its goods subtotal. `None` on overflow.
    #[must_use]
    pub fn for_subtotal(subtotal: u64) -> Option<Self> {
        let tax = percent_of(subtotal, TAX_PERCENT)?;
        let shipping = if subtotal > FREE_SHIPPING_ABOVE {
            0
        } else {
            FLAT_SHIPPING
        };

        Some(Self {
            subtotal,
            tax,
            shipping,
            total: subtotal.checked_add(tax)?.checked_add(shipping)?,
        })
    }
}

/// `amount × percent / 100`, rounding halves up.
#[must_use]
pub fn percent_of(amount: u64, percent: u64) -> Option<u64> {
    let scaled = u128::from(amount) * u128::from(percent) + 50;

    u64::try_from(scaled / 100).ok()
}

/// Price × quantity for one line. `None` on overflow.
#[must_use]
pub fn line_subtotal(unit_price: u64, quantity: u64) -> Option<u64> {
    unit_price.checked_mul(quantity)
}

/// Render paise as rupees, e.g. `₹708.00`.
#[must_use]
pub fn format_rupees(paise: u64) -> String {
    format!("₹{}.{:02}", paise / 100, paise % 100)
}
