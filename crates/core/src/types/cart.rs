//! The cart model.
//!
//! A [`Cart`] is an ordered sequence of [`CartLine`]s. Lines carry a stable
//! [`LineItemId`] assigned at add-to-cart time, and all mutations are keyed
//! by that id; a mutation naming an unknown id is a no-op rather than an
//! error, which keeps concurrent removals harmless.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::category::{Category, Size};
use crate::types::id::{LineItemId, ProductRef};

/// One purchasable reel variant in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable identity assigned when the line was added.
    pub id: LineItemId,
    /// Opaque product/video identifier from the backend listing.
    pub product: ProductRef,
    /// The reel's video URL (doubles as the product preview).
    pub video_url: String,
    /// Category the reel was browsed under.
    pub category: Category,
    /// Size the reel was browsed under.
    pub size: Size,
    /// Price per unit in standard currency units.
    pub unit_price: Decimal,
    /// Units of this variant; never below 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// The line subtotal: `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ordered sequence of cart lines.
///
/// The serialized form of this type is the single durable value the cart
/// store persists; saving is a full-value replace (last-writer-wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of line entries (the cart badge count).
    ///
    /// Counts entries, not quantity, matching the storefront badge.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line to the end of the cart.
    pub fn add(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Delete the line with the given id outright. Unknown ids are a no-op.
    pub fn remove(&mut self, id: LineItemId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Increment the quantity of the line with the given id.
    pub fn increase(&mut self, id: LineItemId) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrement the quantity of the line with the given id, flooring at 1.
    ///
    /// Decrementing a line already at quantity 1 is a no-op; removal is the
    /// only way to drop a line.
    pub fn decrease(&mut self, id: LineItemId) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id)
            && line.quantity > 1
        {
            line.quantity -= 1;
        }
    }

    /// Sum of `unit_price * quantity` over all lines (0 for an empty cart).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: &str, quantity: u32) -> CartLine {
        CartLine {
            id: LineItemId::random(),
            product: ProductRef::new("vid_1"),
            video_url: "https://cdn.example/reel.mp4".to_owned(),
            category: Category::Men,
            size: Size::parse("M").unwrap(),
            unit_price: price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut cart = Cart::new();
        let l = line("100", 2);
        let id = l.id;
        cart.add(l);

        cart.decrease(id);
        assert_eq!(cart.lines()[0].quantity, 1);

        // Decrease at 1 is a no-op, no matter how often it is applied.
        for _ in 0..5 {
            cart.decrease(id);
        }
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn increase_then_decrease_round_trips() {
        let mut cart = Cart::new();
        let l = line("250", 1);
        let id = l.id;
        cart.add(l);

        cart.increase(id);
        cart.increase(id);
        assert_eq!(cart.lines()[0].quantity, 3);
        cart.decrease(id);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn removal_deletes_the_entry_outright() {
        let mut cart = Cart::new();
        let keep = line("100", 1);
        let drop = line("200", 4);
        let drop_id = drop.id;
        let keep_id = keep.id;
        cart.add(keep);
        cart.add(drop);

        cart.remove(drop_id);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].id, keep_id);

        // Removing an unknown id is a no-op.
        cart.remove(drop_id);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn mutations_on_unknown_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.add(line("100", 1));
        let stranger = LineItemId::random();

        cart.increase(stranger);
        cart.decrease(stranger);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn subtotal_is_exact_sum_over_lines() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Decimal::ZERO);

        cart.add(line("500", 1));
        cart.add(line("19.99", 3));
        assert_eq!(cart.subtotal(), "559.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn serializes_and_restores() {
        let mut cart = Cart::new();
        cart.add(line("500", 1));
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
