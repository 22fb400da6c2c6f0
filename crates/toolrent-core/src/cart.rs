//! # Cart Line Items
//!
//! The rental page hands the cart a frozen snapshot of what was selected.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RentalSelection + ToolListing                                          │
//! │        │                                                                │
//! │        ▼  CartLineItem::snapshot()                                      │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ name, price (hourly), duration label, duration hours, quantity,  │  │
//! │  │ logo, category, discount %  ── frozen at the moment of adding    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │        │                                                                │
//! │        ▼  CartCollaborator::add_to_cart()   (fire-and-forget)           │
//! │  whatever cart store the app wires in                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line never refers back to the catalog: its total is recomputed from
//! the snapshot values alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::duration::DurationOption;
use crate::money::Money;
use crate::pricing::{compute_line, PriceBreakdown, Quantity};
use crate::tool::ToolListing;

/// A rental selection queued for later checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// Line identifier (UUID v4).
    pub id: String,

    /// Tool name at time of adding.
    pub name: String,

    /// Hourly rate at time of adding (before duration and discount).
    pub price: Money,

    /// Duration label ("1 Day").
    pub duration: String,

    /// Hours the duration covers.
    pub duration_hours: u32,

    pub quantity: Quantity,

    pub logo: String,

    pub category: String,

    /// Whole-percent discount of the chosen duration.
    pub discount: u8,

    /// When this line was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Freezes a selection into a cart line.
    pub fn snapshot(tool: &ToolListing, duration: &DurationOption, quantity: Quantity) -> Self {
        CartLineItem {
            id: Uuid::new_v4().to_string(),
            name: tool.name.clone(),
            price: tool.hourly_rate,
            duration: duration.label.to_string(),
            duration_hours: duration.hour_multiplier,
            quantity,
            logo: tool.logo.clone(),
            category: tool.category.clone(),
            discount: duration.discount_percent.unwrap_or(0),
            added_at: Utc::now(),
        }
    }

    /// Recomputes the price breakdown from the frozen values.
    pub fn breakdown(&self) -> PriceBreakdown {
        compute_line(self.price, self.duration_hours, self.discount, self.quantity)
    }

    /// Total for this line (unit price after discount × quantity).
    pub fn line_total(&self) -> Money {
        self.breakdown().total
    }
}

/// The cart store, seen from the rental page.
///
/// Adding is fire-and-forget: there is no error contract, so callers report
/// success as soon as the call returns.
pub trait CartCollaborator {
    fn add_to_cart(&self, item: CartLineItem);
}

/// What the renter is told after adding to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartNotice {
    pub message: String,
    pub item: CartLineItem,
}

impl CartNotice {
    /// "Added 2x Figma Pro (1 Day) to cart!"
    pub fn added(item: CartLineItem) -> Self {
        CartNotice {
            message: format!(
                "Added {}x {} ({}) to cart!",
                item.quantity, item.name, item.duration
            ),
            item,
        }
    }
}
