//! The cart store.
//!
//! Owns the set of line items for the current order. Lines keep insertion
//! order (first added renders first); adding an item that is already present
//! merges into the existing line instead of duplicating it.

use delights_core::{ItemId, MenuItem, Price};
use serde::{Deserialize, Serialize};

/// A product about to be added to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartLine {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Price,
    pub image_url: String,
    /// Name of the restaurant the item was ordered from.
    pub restaurant_name: String,
}

impl NewCartLine {
    /// Build a candidate line from a menu item and the restaurant it came
    /// from.
    #[must_use]
    pub fn from_menu_item(item: &MenuItem, restaurant_name: impl Into<String>) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            image_url: item.image_url.clone(),
            restaurant_name: restaurant_name.into(),
        }
    }
}

/// One line item in the cart.
///
/// Invariant: `quantity >= 1`. A line whose quantity would drop to zero is
/// removed from the cart, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Price,
    pub image_url: String,
    pub restaurant_name: String,
    pub quantity: u32,
}

impl CartLine {
    /// Total price of this line (`unit_price × quantity`).
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The cart: an insertion-ordered collection of line items, at most one per
/// item ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `candidate` to the cart.
    ///
    /// If a line with the same ID already exists its quantity is bumped by
    /// one; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, candidate: NewCartLine) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == candidate.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine {
            id: candidate.id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image_url: candidate.image_url,
            restaurant_name: candidate.restaurant_name,
            quantity: 1,
        });
    }

    /// Set the quantity of the line with `id`.
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are a
    /// silent no-op in both directions.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) {
        if quantity <= 0 {
            self.lines.retain(|line| line.id != *id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == *id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines (badge counter).
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of `unit_price × quantity` across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
