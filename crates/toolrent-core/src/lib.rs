//! # toolrent-core: Pure Business Logic for ToolRent
//!
//! Rental pricing, the duration catalog, the rental page state machine and
//! the contracts the page holds with its cart and payment collaborators.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ToolRent Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Frontend                             │   │
//! │  │   Rental page ──► Duration/Qty ──► Add to Cart / Pay button     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 toolrent-storefront (axum)                      │   │
//! │  │   routes, cart store, sandbox payment gateway, config, logs     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ toolrent-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ duration │ │ pricing  │ │  rental  │ │ cart / payment   │  │   │
//! │  │   │ catalog  │ │ Quantity │ │ reducer  │ │ collaborator     │  │   │
//! │  │   │          │ │ Breakdown│ │ page FSM │ │ traits           │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in integer paise
//! - [`duration`] - The six rental durations and their discount tiers
//! - [`pricing`] - Quantity newtype and the price breakdown calculator
//! - [`tool`] - Mock tool listing and suggested tools
//! - [`route`] - Tool identifier decoding from the route segment
//! - [`rental`] - Selection reducer, page state machine and view model
//! - [`cart`] - Cart line snapshots and the cart collaborator trait
//! - [`payment`] - Payment requests, outcomes and the payment collaborator trait
//! - [`pages`] - Not-found and error page view models
//! - [`validation`] - Input checks at the HTTP boundary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use toolrent_core::rental::RentalController;
//! use toolrent_core::tool::ToolListing;
//!
//! let mut page = RentalController::new(ToolListing::mock("Adobe Photoshop"));
//! page.select_duration("24");
//! page.change_quantity(1);
//!
//! // ₹59 × 24h = ₹1416, minus 20% = ₹1132.80, × 2
//! assert_eq!(page.breakdown().total.paise(), 226_560);
//! assert_eq!(page.view().add_to_cart_label, "Add to Cart - ₹2265.60");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod duration;
pub mod error;
pub mod money;
pub mod pages;
pub mod payment;
pub mod pricing;
pub mod rental;
pub mod route;
pub mod tool;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartCollaborator, CartLineItem, CartNotice};
pub use duration::DurationOption;
pub use error::{CoreError, CoreResult, RouteError, ValidationError};
pub use money::Money;
pub use payment::{CheckoutNotice, PaymentCollaborator, PaymentConfirmation, PaymentError};
pub use pricing::{PriceBreakdown, Quantity};
pub use rental::{RentalAction, RentalController, RentalPage, RentalSelection, RentalView};
pub use tool::ToolListing;
