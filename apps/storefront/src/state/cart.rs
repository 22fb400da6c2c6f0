//! # Cart State
//!
//! The in-memory cart store behind [`CartCollaborator`].
//!
//! ## Thread Safety
//! Handlers run concurrently on the tokio runtime, so the cart lives in an
//! `Arc<Mutex<Cart>>` and is locked only for the span of one operation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Frontend Action          Route                       Cart Change       │
//! │  ───────────────          ─────                       ───────────       │
//! │                                                                         │
//! │  Add to Cart ────────► POST /api/rent/{tool}/cart ──► items.push(line) │
//! │                                                                         │
//! │  Click Remove ───────► DELETE /api/cart/{id} ───────► items.remove(i)  │
//! │                                                                         │
//! │  Click Clear ────────► DELETE /api/cart ────────────► items.clear()    │
//! │                                                                         │
//! │  View Cart ──────────► GET /api/cart ───────────────► (read only)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use toolrent_core::{CartCollaborator, CartLineItem, Money};
use tracing::debug;

/// The rental cart.
///
/// Every add is its own line: lines are snapshots and are never merged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartLineItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn add_item(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    /// Removes a line by id, returning it if it was present.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLineItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total rented seats across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }

    /// Sum of the duration discounts granted across all lines.
    ///
    /// Like [`Cart::total`], this saturates at `i64::MAX` paise.
    pub fn savings(&self) -> Money {
        self.items
            .iter()
            .map(|i| {
                let line = i.breakdown();
                line.discount_amount * line.quantity.get()
            })
            .sum()
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub savings: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            savings: cart.savings(),
            total: cart.total(),
        }
    }
}

/// Cart plus its totals, as returned by the cart routes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart: Cart,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            cart: cart.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Shared cart handle.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn summary(&self) -> CartSummary {
        self.with_cart(|cart| CartSummary::from(cart))
    }
}

impl CartCollaborator for CartState {
    fn add_to_cart(&self, item: CartLineItem) {
        debug!(line_id = %item.id, tool = %item.name, quantity = %item.quantity, "Adding line to cart");
        self.with_cart_mut(|cart| cart.add_item(item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolrent_core::duration;
    use toolrent_core::{Quantity, ToolListing};

    fn line(name: &str, duration_id: &str, quantity: i64) -> CartLineItem {
        CartLineItem::snapshot(
            &ToolListing::mock(name),
            duration::find(duration_id).unwrap(),
            Quantity::new(quantity).unwrap(),
        )
    }

    #[test]
    fn test_add_keeps_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(line("Figma Pro", "1", 1));
        cart.add_item(line("Figma Pro", "1", 1));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_totals_are_sum_of_line_totals() {
        let mut cart = Cart::new();
        cart.add_item(line("Adobe Photoshop", "24", 2));
        cart.add_item(line("Figma Pro", "1", 1));

        let expected: Money = cart.items.iter().map(|i| i.line_total()).sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total().paise(), 226_560 + 5_900);

        // 20% of ₹1416 twice
        assert_eq!(cart.savings().paise(), 2 * 28_320);
    }

    #[test]
    fn test_huge_cart_totals_saturate() {
        let week = duration::find("168").unwrap();
        let max_quantity = Quantity::clamped(i64::from(u32::MAX));
        let mut cart = Cart::new();
        for _ in 0..3_200 {
            cart.add_item(CartLineItem::snapshot(
                &ToolListing::mock("Figma Pro"),
                week,
                max_quantity,
            ));
        }

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.total, Money::from_paise(i64::MAX));
        assert!(!totals.savings.is_negative());
        assert_eq!(totals.total_quantity, 3_200 * u64::from(u32::MAX));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        let first = line("Figma Pro", "3", 1);
        let id = first.id.clone();
        cart.add_item(first);
        cart.add_item(line("ChatGPT Plus", "6", 2));

        assert_eq!(cart.remove_item(&id).map(|i| i.name), Some("Figma Pro".to_string()));
        assert!(cart.remove_item(&id).is_none());
        assert_eq!(cart.item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(CartTotals::from(&cart).total, Money::zero());
    }

    #[test]
    fn test_cart_state_is_a_collaborator() {
        let state = CartState::new();
        let shared = state.clone();
        state.add_to_cart(line("Figma Pro", "168", 1));

        let summary = shared.summary();
        assert_eq!(summary.totals.item_count, 1);
        assert_eq!(summary.cart.items[0].duration, "1 Week");
    }
}
