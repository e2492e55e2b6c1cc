//! Cart contents and the transitions that change them.
//!
//! [`CartState`] holds the line items and enforces the two cart invariants:
//! every product appears at most once, and every line has a quantity of at
//! least one. A line whose quantity would reach zero is removed.

use gomarketplace_core::{CartItem, NewCartItem, Price, ProductId, Quantity};

use crate::snapshot::{self, SnapshotError};

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was added with quantity one.
    Added,
    /// An existing line's quantity went up.
    Incremented {
        /// Quantity after the change.
        quantity: Quantity,
    },
    /// An existing line's quantity went down.
    Decremented {
        /// Quantity after the change.
        quantity: Quantity,
    },
    /// The line was removed because its quantity reached zero.
    Removed,
    /// The product was not in the cart; nothing changed.
    Unchanged,
}

impl CartChange {
    /// Whether the cart contents changed.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The cart's line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Decode a stored snapshot into a cart.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the snapshot is malformed or lists a
    /// product twice.
    pub fn from_snapshot(raw: &str) -> Result<Self, SnapshotError> {
        snapshot::decode(raw).map(|items| Self { items })
    }

    /// Encode the cart as a snapshot string.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Encode`] if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, SnapshotError> {
        snapshot::encode(&self.items)
    }

    /// Line items in cart order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart and return its line items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of every line's unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Add a product. If it is already in the cart this is [`Self::increment`].
    pub fn add(&mut self, product: NewCartItem) -> CartChange {
        if self.get(&product.id).is_some() {
            return self.increment(&product.id);
        }
        self.items.push(product.with_quantity(Quantity::ONE));
        CartChange::Added
    }

    /// Raise a line's quantity by one. Unknown ids are ignored.
    pub fn increment(&mut self, id: &ProductId) -> CartChange {
        let Some(item) = self.items.iter_mut().find(|item| item.id == *id) else {
            return CartChange::Unchanged;
        };
        item.quantity = item.quantity.increment();
        CartChange::Incremented {
            quantity: item.quantity,
        }
    }

    /// Lower a line's quantity by one, removing it at zero. Unknown ids are
    /// ignored.
    pub fn decrement(&mut self, id: &ProductId) -> CartChange {
        let Some(pos) = self.items.iter().position(|item| item.id == *id) else {
            return CartChange::Unchanged;
        };
        let Some(item) = self.items.get_mut(pos) else {
            return CartChange::Unchanged;
        };

        if let Some(quantity) = item.quantity.decrement() {
            item.quantity = quantity;
            CartChange::Decremented { quantity }
        } else {
            self.items.remove(pos);
            CartChange::Removed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn product(id: &str) -> NewCartItem {
        NewCartItem {
            id: ProductId::parse(id).unwrap(),
            title: format!("Product {id}"),
            image_url: format!("https://img/{id}.png"),
            price: Price::from_cents(500),
        }
    }

    fn pid(id: &str) -> ProductId {
        ProductId::parse(id).unwrap()
    }

    fn qty(state: &CartState, id: &str) -> Option<u32> {
        state.get(&pid(id)).map(|item| item.quantity.get())
    }

    #[test]
    fn test_add_new_product() {
        let mut state = CartState::new();
        assert_eq!(state.add(product("1")), CartChange::Added);

        assert_eq!(state.len(), 1);
        let item = state.get(&pid("1")).unwrap();
        assert_eq!(item.quantity, Quantity::ONE);
        assert_eq!(item.title, "Product 1");
        assert_eq!(item.image_url, "https://img/1.png");
        assert_eq!(item.price, Price::from_cents(500));
    }

    #[test]
    fn test_add_existing_increments() {
        let mut state = CartState::new();
        state.add(product("1"));
        let change = state.add(product("1"));

        assert_eq!(
            change,
            CartChange::Incremented {
                quantity: Quantity::new(2).unwrap()
            }
        );
        assert_eq!(state.len(), 1);
        assert_eq!(qty(&state, "1"), Some(2));
    }

    #[test]
    fn test_increment_unknown_is_unchanged() {
        let mut state = CartState::new();
        state.add(product("1"));
        let before = state.clone();

        assert_eq!(state.increment(&pid("9")), CartChange::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn test_decrement_unknown_is_unchanged() {
        let mut state = CartState::new();
        assert_eq!(state.decrement(&pid("9")), CartChange::Unchanged);
        assert!(state.is_empty());
    }

    #[test]
    fn test_decrement_at_one_removes() {
        let mut state = CartState::new();
        state.add(product("1"));
        state.add(product("2"));

        assert_eq!(state.decrement(&pid("1")), CartChange::Removed);
        assert_eq!(qty(&state, "1"), None);
        assert_eq!(qty(&state, "2"), Some(1));
    }

    #[test]
    fn test_decrement_at_three_leaves_others_alone() {
        let mut state = CartState::new();
        state.add(product("1"));
        state.add(product("2"));
        state.increment(&pid("1"));
        state.increment(&pid("1"));
        let other_before = state.get(&pid("2")).cloned();

        assert_eq!(
            state.decrement(&pid("1")),
            CartChange::Decremented {
                quantity: Quantity::new(2).unwrap()
            }
        );
        assert_eq!(qty(&state, "1"), Some(2));
        assert_eq!(state.get(&pid("2")).cloned(), other_before);
    }

    #[test]
    fn test_totals() {
        let mut state = CartState::new();
        state.add(product("1"));
        state.add(product("1"));
        state.add(product("2"));

        assert_eq!(state.item_count(), 3);
        assert_eq!(state.subtotal(), Price::from_cents(1500));
        assert_eq!(CartState::new().subtotal(), Price::ZERO);
    }

    #[test]
    fn test_invariants_hold_over_mixed_sequence() {
        let mut state = CartState::new();
        let ids = ["a", "b", "c"];

        for step in 0..300_usize {
            let id = ids[step % ids.len()];
            match (step * 7) % 5 {
                0 | 1 => {
                    state.add(product(id));
                }
                2 => {
                    state.increment(&pid(id));
                }
                _ => {
                    state.decrement(&pid(id));
                }
            }

            let unique: HashSet<_> = state.items().iter().map(|item| &item.id).collect();
            assert_eq!(unique.len(), state.len());
            assert!(state.items().iter().all(|item| item.quantity.get() >= 1));
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = CartState::new();
        state.add(product("1"));
        state.add(product("2"));
        state.increment(&pid("2"));

        let raw = state.to_snapshot().unwrap();
        assert_eq!(CartState::from_snapshot(&raw).unwrap(), state);
    }

    #[test]
    fn test_snapshot_rejects_prices_that_cannot_be_stored() {
        for price in ["5e28", "12345678901234567.89"] {
            let raw = format!(
                r#"[{{"id":"1","title":"t","image_url":"u","price":{price},"quantity":2}}]"#
            );
            assert!(
                matches!(CartState::from_snapshot(&raw), Err(SnapshotError::Decode(_))),
                "{price}"
            );
        }
    }

    #[test]
    fn test_priciest_cart_totals_without_overflow() {
        let mut state = CartState::new();
        state.add(NewCartItem {
            price: Price::MAX,
            ..product("1")
        });
        for _ in 0..10 {
            state.increment(&pid("1"));
        }
        assert_eq!(state.subtotal(), Price::MAX.times(11));

        let raw = state.to_snapshot().unwrap();
        assert_eq!(CartState::from_snapshot(&raw).unwrap(), state);
    }
}
