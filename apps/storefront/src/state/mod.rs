//! # State Module
//!
//! Shared state handed to every handler through axum's `State` extractor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                        AppState (Clone)                                 │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  CartState   │  │  SandboxGateway  │  │ StorefrontConfig │          │
//! │  │  Arc<Mutex<  │  │  mode + limit    │  │  Arc, read-only  │          │
//! │  │    Cart>>    │  │  (stateless)     │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  Only the cart is mutable; every clone shares the same cart.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod payment;

use std::sync::Arc;

pub use cart::{Cart, CartState, CartSummary, CartTotals};
pub use payment::{SandboxGateway, DECLINED_MESSAGE};

use crate::config::StorefrontConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub cart: CartState,
    pub payments: SandboxGateway,
    pub config: Arc<StorefrontConfig>,
}

impl AppState {
    pub fn new(config: StorefrontConfig) -> Self {
        AppState {
            cart: CartState::new(),
            payments: SandboxGateway::from_config(&config.payment),
            config: Arc::new(config),
        }
    }

    pub fn dev_mode(&self) -> bool {
        self.config.dev_mode()
    }
}
