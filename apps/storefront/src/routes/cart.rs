//! Cart listing routes.

use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, CartSummary};

/// `GET /api/cart`
pub async fn get_cart(State(state): State<AppState>) -> Json<CartSummary> {
    Json(state.cart.summary())
}

/// `DELETE /api/cart`
pub async fn clear_cart(State(state): State<AppState>) -> Json<CartSummary> {
    state.cart.with_cart_mut(|cart| cart.clear());
    info!("Cart cleared");
    Json(state.cart.summary())
}

/// `DELETE /api/cart/{id}`
pub async fn remove_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CartSummary>> {
    let removed = state.cart.with_cart_mut(|cart| cart.remove_item(&id));

    match removed {
        Some(line) => {
            debug!(line_id = %line.id, tool = %line.name, "Removed cart line");
            Ok(Json(state.cart.summary()))
        }
        None => Err(ApiError::cart(format!("Line {} not in cart", id))),
    }
}
