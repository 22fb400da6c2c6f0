//! # Rental Page Controller
//!
//! State for one visit to a tool's rental page.
//!
//! ## Page Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐  route resolves to a name   ┌──────────────────────────┐  │
//! │   │ Loading │ ───────────────────────────►│ Ready(RentalController)  │  │
//! │   └─────────┘                             └──────────────────────────┘  │
//! │        │                                         │  select_duration     │
//! │        │ missing / blank / undecodable           │  change_quantity     │
//! │        ▼                                         │  add_to_cart         │
//! │   ┌─────────┐                                    │  checkout            │
//! │   │  Empty  │                                    ▼                      │
//! │   └─────────┘                             (re-render the view)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selection itself is an immutable value: every user interaction is a
//! [`RentalAction`] fed through [`RentalSelection::apply`], which returns the
//! next selection.

use std::fmt;
use std::future::IntoFuture;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartCollaborator, CartLineItem, CartNotice};
use crate::duration::{self, list_durations, DurationOption};
use crate::error::{CoreResult, RouteError};
use crate::payment::{
    CheckoutNotice, PaymentCollaborator, PaymentConfirmation, PaymentError, PaymentRequest,
};
use crate::pricing::{compute_breakdown, PriceBreakdown, Quantity};
use crate::route::{resolve_tool_name, RouteParams};
use crate::tool::ToolListing;

// =============================================================================
// Selection & Reducer
// =============================================================================

/// The renter's current choice on the page.
///
/// Only built through `Default`, [`RentalSelection::restore`] and
/// [`RentalSelection::apply`], so `duration_id` is always a catalog id.
/// Untrusted input arrives as raw values and goes through `restore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalSelection {
    duration_id: String,
    quantity: Quantity,
}

impl Default for RentalSelection {
    /// Duration "1", quantity 1.
    fn default() -> Self {
        RentalSelection {
            duration_id: duration::default_option().id.to_string(),
            quantity: Quantity::ONE,
        }
    }
}

impl RentalSelection {
    /// Restores a selection from untrusted input, falling back to the first
    /// duration and clamping the quantity.
    pub fn restore(duration_id: Option<&str>, quantity: Option<i64>) -> Self {
        RentalSelection {
            duration_id: duration::resolve(duration_id).id.to_string(),
            quantity: quantity.map(Quantity::clamped).unwrap_or_default(),
        }
    }

    pub fn duration_id(&self) -> &str {
        &self.duration_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The selected catalog entry.
    pub fn duration(&self) -> &'static DurationOption {
        duration::resolve(Some(&self.duration_id))
    }

    /// Returns the selection that follows `action`.
    pub fn apply(self, action: RentalAction) -> Self {
        match action {
            RentalAction::SelectDuration { id } => match duration::find(&id) {
                Some(option) => RentalSelection {
                    duration_id: option.id.to_string(),
                    ..self
                },
                None => self,
            },
            RentalAction::ChangeQuantity { delta } => RentalSelection {
                quantity: self.quantity.step(delta),
                ..self
            },
        }
    }
}

/// A user interaction on the rental page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum RentalAction {
    /// Pick a duration button. Unknown ids are ignored.
    SelectDuration { id: String },
    /// Press +/-. The quantity never drops below 1.
    ChangeQuantity { delta: i64 },
}

// =============================================================================
// Page State Machine
// =============================================================================

/// The rental page's state.
#[derive(Debug, Clone, PartialEq)]
pub enum RentalPage {
    /// Waiting for the route to resolve.
    Loading,
    /// Tool resolved; the controller holds the selection.
    Ready(RentalController),
    /// Nothing to show.
    Empty(RouteError),
}

impl RentalPage {
    /// Enters the page: awaits the route parameters once and settles.
    pub async fn enter<F, E>(params: F) -> RentalPage
    where
        F: IntoFuture<Output = Result<RouteParams, E>>,
        E: fmt::Display,
    {
        RentalPage::Loading.resolved(resolve_tool_name(params).await)
    }

    /// Applies the route resolution. Only `Loading` transitions; a settled
    /// page ignores further results.
    pub fn resolved(self, resolution: Result<String, RouteError>) -> RentalPage {
        match self {
            RentalPage::Loading => match resolution {
                Ok(name) => RentalPage::Ready(RentalController::new(ToolListing::mock(name))),
                Err(reason) => RentalPage::Empty(reason),
            },
            settled => settled,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RentalPage::Loading)
    }

    /// Converts into the controller, or the reason there is none.
    pub fn into_ready(self) -> Result<RentalController, RouteError> {
        match self {
            RentalPage::Ready(controller) => Ok(controller),
            RentalPage::Empty(reason) => Err(reason),
            RentalPage::Loading => Err(RouteError::Unavailable("page still loading".to_string())),
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// A resolved rental page: the tool plus the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalController {
    tool: ToolListing,
    selection: RentalSelection,
}

impl RentalController {
    pub fn new(tool: ToolListing) -> Self {
        RentalController {
            tool,
            selection: RentalSelection::default(),
        }
    }

    /// Replaces the selection (e.g. one restored from a request).
    pub fn with_selection(mut self, selection: RentalSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn tool(&self) -> &ToolListing {
        &self.tool
    }

    pub fn selection(&self) -> &RentalSelection {
        &self.selection
    }

    /// Feeds one interaction through the reducer.
    pub fn dispatch(&mut self, action: RentalAction) {
        self.selection = std::mem::take(&mut self.selection).apply(action);
    }

    pub fn select_duration(&mut self, id: &str) {
        self.dispatch(RentalAction::SelectDuration { id: id.to_string() });
    }

    pub fn change_quantity(&mut self, delta: i64) {
        self.dispatch(RentalAction::ChangeQuantity { delta });
    }

    /// Price of the current selection.
    pub fn breakdown(&self) -> PriceBreakdown {
        compute_breakdown(
            self.tool.hourly_rate,
            self.selection.duration(),
            self.selection.quantity,
        )
    }

    /// Snapshots the selection into the cart. Always succeeds.
    pub fn add_to_cart<C>(&self, cart: &C) -> CartNotice
    where
        C: CartCollaborator + ?Sized,
    {
        let item = CartLineItem::snapshot(
            &self.tool,
            self.selection.duration(),
            self.selection.quantity,
        );
        cart.add_to_cart(item.clone());
        CartNotice::added(item)
    }

    /// What the payment button is asked to charge.
    pub fn payment_request(&self) -> CoreResult<PaymentRequest> {
        PaymentRequest::new(
            self.breakdown().total,
            self.tool.name.clone(),
            self.selection.quantity,
            self.selection.duration().label,
        )
    }

    /// Pays through the collaborator and reports the outcome.
    pub async fn checkout<P>(&self, payments: &P) -> CoreResult<CheckoutNotice>
    where
        P: PaymentCollaborator,
    {
        let request = self.payment_request()?;
        let outcome = payments.request_payment(&request).await;
        Ok(CheckoutNotice::settle(&request, outcome))
    }

    /// Reports an outcome delivered through the button's callbacks.
    pub fn settle_checkout(
        &self,
        outcome: Result<PaymentConfirmation, PaymentError>,
    ) -> CoreResult<CheckoutNotice> {
        let request = self.payment_request()?;
        Ok(CheckoutNotice::settle(&request, outcome))
    }

    /// The full rental view for rendering.
    pub fn view(&self) -> RentalView {
        let breakdown = self.breakdown();
        let duration = self.selection.duration();

        RentalView {
            tool: self.tool.clone(),
            durations: list_durations()
                .iter()
                .map(|d| DurationChoice::new(d, d.id == duration.id))
                .collect(),
            selection: self.selection.clone(),
            display: PriceDisplay::new(&breakdown, duration),
            add_to_cart_label: format!("Add to Cart - {}", breakdown.total),
            breakdown,
        }
    }
}

// =============================================================================
// View Model
// =============================================================================

/// Everything the rental page renders in the `Ready` state.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalView {
    pub tool: ToolListing,
    pub durations: Vec<DurationChoice>,
    pub selection: RentalSelection,
    pub breakdown: PriceBreakdown,
    pub display: PriceDisplay,
    pub add_to_cart_label: String,
}

/// One duration button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DurationChoice {
    pub id: String,
    pub label: String,
    pub hour_multiplier: u32,
    pub discount_percent: Option<u8>,
    pub badge: Option<String>,
    pub selected: bool,
}

impl DurationChoice {
    fn new(option: &DurationOption, selected: bool) -> Self {
        DurationChoice {
            id: option.id.to_string(),
            label: option.label.to_string(),
            hour_multiplier: option.hour_multiplier,
            discount_percent: option.discount_percent,
            badge: option.badge(),
            selected,
        }
    }
}

/// Pre-formatted breakdown lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceDisplay {
    /// "Base Price (1 Day)"
    pub base_label: String,
    pub base_price: String,
    /// `None` hides the discount line.
    pub discount_label: Option<String>,
    pub discount_amount: Option<String>,
    /// "×2"
    pub quantity: String,
    pub total: String,
}

impl PriceDisplay {
    fn new(breakdown: &PriceBreakdown, duration: &DurationOption) -> Self {
        let discounted = breakdown.has_discount();
        PriceDisplay {
            base_label: format!("Base Price ({})", duration.label),
            base_price: breakdown.base_price.to_string(),
            discount_label: discounted.then(|| format!("Discount ({}%)", breakdown.discount_percent)),
            discount_amount: discounted.then(|| format!("-{}", breakdown.discount_amount)),
            quantity: format!("×{}", breakdown.quantity),
            total: breakdown.total.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
