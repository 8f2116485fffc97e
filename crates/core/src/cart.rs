//! Shopping cart store.
//!
//! A [`CartStore`] holds the dishes a shopper has selected, keyed by menu item
//! id. The menu page produces lines through [`CartStore::add_item`]; the cart
//! and checkout pages read lines and totals and adjust quantities; the
//! navigation badge reads [`CartStore::total_item_count`].
//!
//! # Invariants
//!
//! - Line ids are distinct. Adding an id that is already present increments
//!   its quantity instead of creating a second line.
//! - Every line has `quantity >= 1`. Driving a quantity to zero or below
//!   removes the line.
//! - Name, price, and image are a snapshot taken the first time an id is
//!   added. Later adds and catalog edits do not refresh them.
//!
//! Every operation is total: unknown ids and non-positive quantities are
//! normalized silently, never reported as errors.
//!
//! # Change notification
//!
//! Each mutation that changes the cart bumps [`CartStore::version`] and then
//! synchronously calls every subscribed observer with a [`CartEvent`].
//! Operations that leave the cart untouched (removing an unknown id,
//! clearing an empty cart) publish nothing.
//!
//! ```
//! use cafe_nine_core::{CartCandidate, CartStore, MenuItemId, Price};
//!
//! let mut cart = CartStore::new();
//! let salad = CartCandidate::new("1", "Caesar Salad", Price::from_whole(14), "x");
//! let salmon = CartCandidate::new("2", "Salmon", Price::from_whole(32), "y");
//!
//! cart.add_item(salad.clone());
//! cart.add_item(salmon);
//! cart.add_item(salad);
//!
//! assert_eq!(cart.lines().len(), 2);
//! assert_eq!(cart.line(&MenuItemId::new("1")).map(|l| l.quantity()), Some(2));
//! assert_eq!(cart.total_price(), Price::from_whole(60));
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{MenuItemId, Price};

/// The snapshot of a menu item handed to [`CartStore::add_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCandidate {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl CartCandidate {
    /// Build a candidate from its parts.
    #[must_use]
    pub fn new(
        id: impl Into<MenuItemId>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// One distinct dish in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    id: MenuItemId,
    name: String,
    price: Price,
    image: String,
    quantity: u32,
}

impl CartLine {
    fn from_candidate(candidate: CartCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            price: candidate.price,
            image: candidate.image,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &MenuItemId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured when the line was created.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// A change published to cart observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A dish was added; `quantity` is the line's quantity after the add.
    Added { id: MenuItemId, quantity: u32 },
    /// An explicit quantity update left the line at `quantity`.
    QuantityChanged { id: MenuItemId, quantity: u32 },
    /// The line was removed, explicitly or by a non-positive quantity.
    Removed { id: MenuItemId },
    /// Every line was dropped.
    Cleared { lines_removed: usize },
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&CartEvent, &CartStore) + Send + Sync>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// The shopper's cart.
///
/// Constructed empty; lives for the shopper's session. Serializes to its lines
/// and version only; observers are process-local and are not carried across
/// serialization.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
    version: u64,
    #[serde(skip)]
    observers: Observers,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a dish.
    ///
    /// If the id is already in the cart its quantity goes up by one and the
    /// stored name, price, and image are kept. Otherwise a new line is
    /// created with quantity 1.
    pub fn add_item(&mut self, candidate: CartCandidate) {
        let event = if let Some(line) = self.line_mut(&candidate.id) {
            line.quantity = line.quantity.saturating_add(1);
            CartEvent::Added {
                id: candidate.id,
                quantity: line.quantity,
            }
        } else {
            let id = candidate.id.clone();
            self.lines.push(CartLine::from_candidate(candidate));
            CartEvent::Added { id, quantity: 1 }
        };
        self.publish(&event);
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &MenuItemId) {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        if self.lines.len() != before {
            self.publish(&CartEvent::Removed { id: id.clone() });
        }
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or below removes the line. Unknown ids are ignored.
    /// Quantities beyond `u32::MAX` saturate.
    pub fn update_quantity(&mut self, id: &MenuItemId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let Some(line) = self.line_mut(id) else {
            return;
        };
        if line.quantity == quantity {
            return;
        }
        line.quantity = quantity;
        self.publish(&CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        });
    }

    /// Drop every line.
    pub fn clear_cart(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let lines_removed = self.lines.len();
        self.lines.clear();
        self.publish(&CartEvent::Cleared { lines_removed });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a single line.
    #[must_use]
    pub fn line(&self, id: &MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Sum of `price * quantity` over all lines; zero when empty.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of line quantities (not the number of distinct lines).
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines. Checkout is only offered when `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Monotonic change counter, bumped once per state-changing mutation.
    ///
    /// Consumers that poll rather than subscribe compare versions to detect
    /// changes.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a callback invoked after every state-changing mutation.
    ///
    /// Callbacks run synchronously, in subscription order, and see the cart
    /// as it is after the mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &Self) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.observers.next_id);
        self.observers.next_id += 1;
        self.observers.entries.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered callback. Returns `false` if it was
    /// already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.entries.len();
        self.observers.entries.retain(|(entry, _)| *entry != id);
        self.observers.entries.len() != before
    }

    fn line_mut(&mut self, id: &MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }

    fn publish(&mut self, event: &CartEvent) {
        self.version += 1;
        tracing::debug!(
            ?event,
            version = self.version,
            items = self.total_item_count(),
            "cart changed"
        );

        // Observers get a shared view of the store, so detach them while they run.
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in &mut observers.entries {
            observer(event, self);
        }
        self.observers = observers;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn candidate(id: &str, name: &str, dollars: u32) -> CartCandidate {
        CartCandidate::new(id, name, Price::from_whole(dollars), format!("{id}.jpg"))
    }

    fn id(value: &str) -> MenuItemId {
        MenuItemId::new(value)
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Price::ZERO);
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn test_repeated_adds_collapse_into_one_line() {
        let mut cart = CartStore::new();
        for _ in 0..3 {
            cart.add_item(candidate("1", "Caesar Salad Supreme", 14));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&id("1")).unwrap().quantity(), 3);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_first_seen_snapshot_wins() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.add_item(CartCandidate::new(
            "1",
            "Renamed Salad",
            Price::from_whole(99),
            "other.jpg",
        ));

        let line = cart.line(&id("1")).unwrap();
        assert_eq!(line.name(), "Caesar Salad");
        assert_eq!(line.price(), Price::from_whole(14));
        assert_eq!(line.image(), "1.jpg");
        assert_eq!(line.quantity(), 2);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut cart = CartStore::new();
        cart.add_item(CartCandidate::new("1", "Caesar Salad", Price::from_whole(14), "x"));
        cart.add_item(CartCandidate::new("2", "Salmon", Price::from_whole(32), "y"));
        cart.add_item(CartCandidate::new("1", "Caesar Salad", Price::from_whole(14), "x"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(&id("1")).unwrap().quantity(), 2);
        assert_eq!(cart.line(&id("2")).unwrap().quantity(), 1);
        assert_eq!(cart.total_price(), Price::from_whole(60));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("9", "Artisan Coffee", 5));
        cart.add_item(candidate("7", "Chocolate Lava Cake", 12));
        cart.add_item(candidate("9", "Artisan Coffee", 5));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, ["9", "7"]);
    }

    #[test]
    fn test_total_price_is_sum_of_line_totals() {
        let mut cart = CartStore::new();
        cart.add_item(CartCandidate::new("a", "Soup", Price::from_cents(1650), "a"));
        cart.add_item(candidate("b", "Tiramisu", 11));
        cart.update_quantity(&id("a"), 3);

        let expected: Price = cart.lines().iter().map(CartLine::line_total).sum();
        assert_eq!(cart.total_price(), expected);
        assert_eq!(cart.total_price(), Price::from_cents(6050));
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("4", "Wagyu Beef Steak", 68));
        cart.update_quantity(&id("4"), 5);

        assert_eq!(cart.line(&id("4")).unwrap().quantity(), 5);
        assert_eq!(cart.total_price(), Price::from_whole(340));
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.update_quantity(&id("1"), 0);
        assert!(cart.line(&id("1")).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.add_item(candidate("2", "Salmon", 32));
        cart.update_quantity(&id("1"), -1);

        assert!(cart.line(&id("1")).is_none());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        let version = cart.version();

        cart.update_quantity(&id("missing"), 4);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.version(), version);
    }

    #[test]
    fn test_update_quantity_saturates() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 1));
        cart.update_quantity(&id("1"), i64::MAX);
        assert_eq!(cart.line(&id("1")).unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn test_remove_unknown_id_leaves_cart_unchanged() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        let before = cart.lines().to_vec();
        let version = cart.version();

        cart.remove_item(&id("nope"));
        cart.remove_item(&id("nope"));

        assert_eq!(cart.lines(), before.as_slice());
        assert_eq!(cart.version(), version);
    }

    #[test]
    fn test_remove_existing_line() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.remove_item(&id("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_cart_zeroes_total() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("10", "French Champagne", 85));
        cart.add_item(candidate("5", "Lobster Risotto", 45));
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Price::ZERO);

        // Clearing an already empty cart still leaves it empty.
        cart.clear_cart();
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_version_bumps_only_on_change() {
        let mut cart = CartStore::new();
        cart.add_item(candidate("1", "Caesar Salad", 14));
        assert_eq!(cart.version(), 1);

        cart.update_quantity(&id("1"), 1);
        assert_eq!(cart.version(), 1);

        cart.update_quantity(&id("1"), 2);
        assert_eq!(cart.version(), 2);

        cart.clear_cart();
        assert_eq!(cart.version(), 3);

        cart.clear_cart();
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn test_observers_receive_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut cart = CartStore::new();
        cart.subscribe(move |event, store| {
            sink.lock()
                .unwrap()
                .push((event.clone(), store.total_item_count()));
        });

        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.add_item(candidate("1", "Caesar Salad", 14));
        cart.update_quantity(&id("1"), 5);
        cart.remove_item(&id("1"));
        cart.remove_item(&id("1"));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (
                    CartEvent::Added {
                        id: id("1"),
                        quantity: 1
                    },
                    1
                ),
                (
                    CartEvent::Added {
                        id: id("1"),
                        quantity: 2
                    },
                    2
                ),
                (
                    CartEvent::QuantityChanged {
                        id: id("1"),
                        quantity: 5
                    },
                    5
                ),
                (CartEvent::Removed { id: id("1") }, 0),
            ]
        );
    }

    #[test]
    fn test_update_to_zero_publishes_removed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut cart = CartStore::new();
        cart.add_item(candidate("3", "Grilled Atlantic Salmon", 32));
        cart.subscribe(move |event, _| sink.lock().unwrap().push(event.clone()));
        cart.update_quantity(&id("3"), 0);

        assert_eq!(*seen.lock().unwrap(), vec![CartEvent::Removed { id: id("3") }]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Arc::new(Mutex::new(0_u32));
        let sink = Arc::clone(&count);

        let mut cart = CartStore::new();
        let subscription = cart.subscribe(move |_, _| *sink.lock().unwrap() += 1);
        cart.add_item(candidate("1", "Caesar Salad", 14));

        assert!(cart.unsubscribe(subscription));
        assert!(!cart.unsubscribe(subscription));
        cart.add_item(candidate("1", "Caesar Salad", 14));

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_serde_round_trip_drops_observers() {
        let mut cart = CartStore::new();
        cart.subscribe(|_, _| {});
        cart.add_item(candidate("8", "Tiramisu", 11));
        cart.add_item(candidate("8", "Tiramisu", 11));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartStore = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.lines(), cart.lines());
        assert_eq!(restored.version(), cart.version());
        assert_eq!(restored.total_price(), Price::from_whole(22));
    }
}
