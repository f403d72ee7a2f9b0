//! Shopping cart state machine
//!
//! A cart holds lines from exactly one restaurant. Adding an item from a
//! different restaurant never mutates the cart directly: it yields a
//! [`PendingReplace`] token, and only [`Cart::confirm_replace`] swaps the
//! cart over to the new restaurant.

mod item;

pub use item::{CartItem, CartItemInput, MAX_PRICE, MAX_QUANTITY};

use crate::error::{AppError, AppResult, ErrorCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of [`Cart::add_item`]
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum AddItemOutcome {
    /// New line with quantity 1
    Added,
    /// Existing line bumped to `quantity`
    Incremented { quantity: u32 },
    /// Cart holds another restaurant; nothing changed
    RestaurantConflict(PendingReplace),
}

/// Deferred "clear the cart and start over with this item" decision
///
/// Obtained from [`AddItemOutcome::RestaurantConflict`]. Dropping the token
/// keeps the current cart.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending replace does nothing until passed to Cart::confirm_replace"]
pub struct PendingReplace {
    item: CartItem,
    current_restaurant_id: String,
}

impl PendingReplace {
    /// Item that would seed the new cart
    pub fn item(&self) -> &CartItem {
        &self.item
    }

    /// Restaurant the cart currently belongs to
    pub fn current_restaurant_id(&self) -> &str {
        &self.current_restaurant_id
    }
}

/// Persisted cart shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<CartItem>,
    #[serde(default, alias = "restaurantId")]
    restaurant_id: Option<String>,
}

/// Single-restaurant shopping cart
///
/// Lines keep insertion order and ids are unique. A non-empty cart is tagged
/// with the restaurant of its lines; an empty cart has no tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartSnapshot")]
pub struct Cart {
    items: Vec<CartItem>,
    restaurant_id: Option<String>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines (reorder, rehydration)
    ///
    /// Duplicate ids are merged by summing quantities. Lines from more than
    /// one restaurant are rejected.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> AppResult<Self> {
        let mut cart = Cart::new();
        for item in items {
            match &cart.restaurant_id {
                Some(rid) if rid != item.restaurant_id() => {
                    return Err(AppError::new(ErrorCode::OrderMixedRestaurants)
                        .with_detail("expected", rid.clone())
                        .with_detail("found", item.restaurant_id().to_string()));
                }
                Some(_) => {}
                None => cart.restaurant_id = Some(item.restaurant_id().to_string()),
            }
            if let Some(existing) = cart.items.iter_mut().find(|i| i.id() == item.id()) {
                let merged =
                    item::validate_quantity(i64::from(existing.quantity()) + i64::from(item.quantity()))?;
                existing.set_quantity(merged);
            } else {
                cart.items.push(item);
            }
        }
        Ok(cart)
    }

    /// Add one unit of `item`
    ///
    /// The incoming item's quantity is ignored: a new line starts at 1 and an
    /// existing line is incremented by 1.
    pub fn add_item(&mut self, item: CartItem) -> AddItemOutcome {
        if let Some(current) = &self.restaurant_id
            && current != item.restaurant_id()
        {
            return AddItemOutcome::RestaurantConflict(PendingReplace {
                current_restaurant_id: current.clone(),
                item,
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == item.id()) {
            let quantity = existing.quantity().saturating_add(1).min(MAX_QUANTITY);
            existing.set_quantity(quantity);
            return AddItemOutcome::Incremented { quantity };
        }

        self.restaurant_id = Some(item.restaurant_id().to_string());
        let mut item = item;
        item.set_quantity(1);
        self.items.push(item);
        AddItemOutcome::Added
    }

    /// Clear the cart and seed it with the pending item (quantity 1)
    pub fn confirm_replace(&mut self, pending: PendingReplace) {
        let mut item = pending.item;
        item.set_quantity(1);
        self.restaurant_id = Some(item.restaurant_id().to_string());
        self.items = vec![item];
    }

    /// Remove a line; an emptied cart drops its restaurant tag
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        if self.items.is_empty() {
            self.restaurant_id = None;
        }
        self.items.len() != before
    }

    /// Set a line's quantity exactly; `quantity <= 0` removes the line
    ///
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> AppResult<()> {
        if quantity <= 0 {
            self.remove_item(id);
            return Ok(());
        }
        let quantity = item::validate_quantity(quantity)?;
        if let Some(line) = self.items.iter_mut().find(|i| i.id() == id) {
            line.set_quantity(quantity);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant_id = None;
    }

    /// Take the lines of an `ordered` snapshot out of this cart
    ///
    /// Each ordered line lowers the matching line by its quantity and drops
    /// it once nothing is left. Lines added since the snapshot, and units
    /// beyond the ordered quantity, stay. A cart that has moved on to
    /// another restaurant is left alone.
    pub fn take_ordered(&mut self, ordered: &Cart) {
        if self.restaurant_id != ordered.restaurant_id {
            return;
        }
        for placed in &ordered.items {
            let Some(line) = self.items.iter_mut().find(|i| i.id() == placed.id()) else {
                continue;
            };
            match line.quantity().checked_sub(placed.quantity()) {
                Some(left) if left > 0 => line.set_quantity(left),
                _ => {
                    self.remove_item(placed.id());
                }
            }
        }
    }

    /// Σ price × quantity, unrounded
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(CartItem::quantity).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    pub fn restaurant_name(&self) -> Option<&str> {
        self.items.iter().find_map(CartItem::restaurant_name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = AppError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let cart = Cart::from_items(snapshot.items)?;
        if let (Some(tag), Some(actual)) = (&snapshot.restaurant_id, cart.restaurant_id())
            && tag != actual
        {
            return Err(AppError::validation(format!(
                "cart tagged with restaurant {tag} holds items from {actual}"
            )));
        }
        Ok(cart)
    }
}
