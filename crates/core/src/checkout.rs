//! Order summary math shown on the cart and checkout pages.
//!
//! Tax and delivery are presentation logic layered on top of
//! [`CartStore::total_price`]; the cart itself knows nothing about them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::cart::{CartLine, CartStore};
use crate::types::{Price, UserId};

/// Flat sales tax applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Delivery fee charged when the subtotal does not exceed the threshold.
pub const DELIVERY_FEE: Price = Price::from_whole(5);

/// Subtotals strictly above this ship for free.
pub const FREE_DELIVERY_THRESHOLD: Price = Price::from_whole(50);

/// Subtotal, tax, delivery, and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub tax: Price,
    pub delivery_fee: Price,
    pub total: Price,
    /// How much more to spend for free delivery, when the cart is non-empty
    /// and below the threshold.
    pub free_delivery_shortfall: Option<Price>,
}

impl OrderSummary {
    /// Compute the summary for an arbitrary subtotal.
    ///
    /// An empty subtotal carries no delivery fee since nothing is delivered.
    #[must_use]
    pub fn from_subtotal(subtotal: Price) -> Self {
        let tax = subtotal.apply_rate(TAX_RATE);
        let delivery_fee = if subtotal.is_zero() || subtotal > FREE_DELIVERY_THRESHOLD {
            Price::ZERO
        } else {
            DELIVERY_FEE
        };
        let free_delivery_shortfall = (!subtotal.is_zero() && subtotal < FREE_DELIVERY_THRESHOLD)
            .then(|| FREE_DELIVERY_THRESHOLD.saturating_sub(subtotal));

        Self {
            subtotal,
            tax,
            delivery_fee,
            total: subtotal + tax + delivery_fee,
            free_delivery_shortfall,
        }
    }

    /// Compute the summary for the cart's current contents.
    #[must_use]
    pub fn for_cart(cart: &CartStore) -> Self {
        Self::from_subtotal(cart.total_price())
    }

    /// Whether delivery is free for this order.
    #[must_use]
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}

/// A placed order: the cart contents and totals at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    /// Order number quoted to the guest, e.g. `CN-1A2B3C4D`.
    pub number: String,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    pub placed_by: Option<UserId>,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// Snapshot a cart into a receipt. Returns `None` for an empty cart.
    #[must_use]
    pub fn from_cart(cart: &CartStore, placed_by: Option<UserId>) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        let mut code = Uuid::new_v4().simple().to_string();
        code.truncate(8);
        code.make_ascii_uppercase();

        Some(Self {
            number: format!("CN-{code}"),
            lines: cart.lines().to_vec(),
            summary: OrderSummary::for_cart(cart),
            placed_by,
            placed_at: Utc::now(),
        })
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity()))
    }
}

/// In-memory order history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OrderLog {
    orders: Vec<OrderReceipt>,
}

impl OrderLog {
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    pub fn record(&mut self, receipt: OrderReceipt) {
        tracing::info!(
            order = %receipt.number,
            items = receipt.item_count(),
            total = %receipt.summary.total,
            "Order placed"
        );
        self.orders.push(receipt);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Most recent orders first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &OrderReceipt> {
        self.orders.iter().rev().take(limit)
    }

    /// Orders placed by one account, most recent first.
    pub fn for_customer<'a>(
        &'a self,
        user: &'a UserId,
    ) -> impl Iterator<Item = &'a OrderReceipt> + 'a {
        self.orders
            .iter()
            .rev()
            .filter(move |order| order.placed_by.as_ref() == Some(user))
    }

    /// Number of orders placed on `day` (UTC).
    #[must_use]
    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.orders
            .iter()
            .filter(|order| order.placed_at.date_naive() == day)
            .count()
    }

    /// Sum of order totals placed on `day` (UTC).
    #[must_use]
    pub fn revenue_on(&self, day: NaiveDate) -> Price {
        self.orders
            .iter()
            .filter(|order| order.placed_at.date_naive() == day)
            .map(|order| order.summary.total)
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartCandidate;

    #[test]
    fn test_subtotal_below_threshold_pays_delivery() {
        let summary = OrderSummary::from_subtotal(Price::from_whole(45));
        assert_eq!(summary.delivery_fee, DELIVERY_FEE);
        assert!(!summary.has_free_delivery());
        assert_eq!(summary.tax, Price::from_cents(360));
        assert_eq!(summary.total, Price::from_cents(5360));
        assert_eq!(summary.free_delivery_shortfall, Some(Price::from_whole(5)));
    }

    #[test]
    fn test_subtotal_above_threshold_ships_free() {
        let summary = OrderSummary::from_subtotal(Price::from_whole(60));
        assert_eq!(summary.delivery_fee, Price::ZERO);
        assert!(summary.has_free_delivery());
        assert_eq!(summary.tax, Price::from_cents(480));
        assert_eq!(summary.total, Price::from_cents(6480));
        assert_eq!(summary.free_delivery_shortfall, None);
    }

    #[test]
    fn test_subtotal_exactly_at_threshold_still_pays() {
        let summary = OrderSummary::from_subtotal(FREE_DELIVERY_THRESHOLD);
        assert_eq!(summary.delivery_fee, DELIVERY_FEE);
        assert_eq!(summary.free_delivery_shortfall, None);
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let summary = OrderSummary::for_cart(&CartStore::new());
        assert_eq!(summary.subtotal, Price::ZERO);
        assert_eq!(summary.tax, Price::ZERO);
        assert_eq!(summary.delivery_fee, Price::ZERO);
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.free_delivery_shortfall, None);
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        // 8% of $16.99 = $1.3592
        let summary = OrderSummary::from_subtotal(Price::from_cents(1699));
        assert_eq!(summary.tax, Price::from_cents(136));
    }

    #[test]
    fn test_for_cart_reads_cart_total() {
        let mut cart = CartStore::new();
        cart.add_item(CartCandidate::new("1", "Caesar Salad", Price::from_whole(14), "x"));
        cart.add_item(CartCandidate::new("2", "Salmon", Price::from_whole(32), "y"));
        cart.add_item(CartCandidate::new("1", "Caesar Salad", Price::from_whole(14), "x"));

        let summary = OrderSummary::for_cart(&cart);
        assert_eq!(summary.subtotal, Price::from_whole(60));
        assert!(summary.has_free_delivery());
    }

    #[test]
    fn test_receipt_requires_items() {
        assert!(OrderReceipt::from_cart(&CartStore::new(), None).is_none());
    }

    #[test]
    fn test_order_log_daily_stats() {
        let mut cart = CartStore::new();
        cart.add_item(CartCandidate::new("4", "Wagyu Beef Steak", Price::from_whole(68), "x"));
        cart.add_item(CartCandidate::new("9", "Artisan Coffee", Price::from_whole(5), "y"));
        cart.add_item(CartCandidate::new("9", "Artisan Coffee", Price::from_whole(5), "y"));

        let user = UserId::new("u-1");
        let receipt = OrderReceipt::from_cart(&cart, Some(user.clone())).unwrap();
        assert!(receipt.number.starts_with("CN-"));
        assert_eq!(receipt.item_count(), 3);
        // 78 + 6.24 tax, free delivery
        assert_eq!(receipt.summary.total, Price::from_cents(8424));

        let today = receipt.placed_at.date_naive();
        let mut log = OrderLog::new();
        log.record(receipt.clone());
        log.record(OrderReceipt::from_cart(&cart, None).unwrap());

        assert_eq!(log.len(), 2);
        assert_eq!(log.count_on(today), 2);
        assert_eq!(log.revenue_on(today), Price::from_cents(16848));
        assert_eq!(log.for_customer(&user).count(), 1);
        assert_eq!(log.recent(1).count(), 1);
        assert_eq!(log.count_on(today.pred_opt().unwrap()), 0);
    }
}
