//! # ToolRent Storefront
//!
//! HTTP front of the rental pages. Business rules live in `toolrent-core`;
//! this crate wires them to axum, owns the concrete cart and payment
//! collaborators, and carries configuration and logging.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Browser ──► TraceLayer ──► CatchPanicLayer ──► Router                  │
//! │                                  │                 │                    │
//! │                                  │ panic           ├── routes::rent     │
//! │                                  ▼                 ├── routes::cart     │
//! │                            500 ErrorPage           └── routes::pages    │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                                              toolrent-core + AppState   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::routes::pages::PanicPage;
use crate::routes::{cart, pages, rent};
pub use crate::state::AppState;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,toolrent=debug,tower_http=info";

/// Builds the storefront router over `state`.
pub fn router(state: AppState) -> Router {
    let dev_mode = state.dev_mode();

    Router::new()
        .route("/health", get(pages::health))
        .route("/api/durations", get(pages::durations))
        .route("/api/rent/{tool}", get(rent::view))
        .route("/api/rent/{tool}/actions", post(rent::apply_action))
        .route("/api/rent/{tool}/cart", post(rent::add_to_cart))
        .route("/api/rent/{tool}/checkout", post(rent::checkout))
        .route("/api/rent/{tool}/checkout/outcome", post(rent::checkout_outcome))
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/{id}", delete(cart::remove_line))
        .fallback(pages::fallback)
        .layer(CatchPanicLayer::custom(PanicPage::new(dev_mode)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initializes the tracing subscriber.
///
/// Uses `RUST_LOG` when set, otherwise [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_target(true)
        .init();
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaymentMode, StorefrontConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(StorefrontConfig::default()))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_durations() {
        let response = app().oneshot(get_req("/api/durations")).await.unwrap();
        let json = body_json(response).await;
        let ids: Vec<_> = json.as_array().unwrap().iter().map(|d| d["id"].clone()).collect();
        assert_eq!(ids, [json!("1"), json!("3"), json!("6"), json!("12"), json!("24"), json!("168")]);
        assert_eq!(json[4]["discountPercent"], 20);
    }

    #[tokio::test]
    async fn test_rental_view_decodes_name_and_prices() {
        let response = app()
            .oneshot(get_req("/api/rent/Adobe%20Photoshop?duration=24&quantity=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["tool"]["name"], "Adobe Photoshop");
        assert_eq!(json["breakdown"]["basePrice"], 141_600);
        assert_eq!(json["breakdown"]["discountAmount"], 28_320);
        assert_eq!(json["breakdown"]["total"], 226_560);
        assert_eq!(json["addToCartLabel"], "Add to Cart - ₹2265.60");
    }

    #[tokio::test]
    async fn test_rental_view_falls_back_on_bad_query() {
        let response = app()
            .oneshot(get_req("/api/rent/Figma?duration=2&quantity=zero"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["selection"]["durationId"], "1");
        assert_eq!(json["selection"]["quantity"], 1);
        assert_eq!(json["breakdown"]["total"], 5_900);
    }

    #[tokio::test]
    async fn test_unresolvable_tool_renders_not_found() {
        for uri in ["/api/rent/%20%20", "/api/rent/%E0%A4%A", "/api/rent/%FF"] {
            let response = app().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let json = body_json(response).await;
            assert_eq!(json["title"], "Tool Not Found");
            assert_eq!(json["suggestions"][0]["rentPath"], "/rent/Adobe%20Photoshop");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found() {
        let response = app().oneshot(get_req("/nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["title"], "Tool Not Found");
    }

    #[tokio::test]
    async fn test_actions() {
        let response = app()
            .oneshot(json_req(
                Method::POST,
                "/api/rent/Figma%20Pro/actions",
                json!({
                    "selection": {"durationId": "24", "quantity": 2},
                    "action": {"type": "selectDuration", "id": "25"}
                }),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["selection"]["durationId"], "24");

        let response = app()
            .oneshot(json_req(
                Method::POST,
                "/api/rent/Figma%20Pro/actions",
                json!({
                    "selection": {"durationId": "24", "quantity": 2},
                    "action": {"type": "changeQuantity", "delta": -5}
                }),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["selection"]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_malformed_action_is_validation_error() {
        let response = app()
            .oneshot(json_req(
                Method::POST,
                "/api/rent/Figma/actions",
                json!({"action": {"type": "teleport"}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_truncated_selection_body_is_validation_error() {
        for uri in ["/api/rent/Figma/cart", "/api/rent/Figma/checkout"] {
            let request = Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"quantity": "#))
                .unwrap();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = body_json(response).await;
            assert_eq!(json["code"], "VALIDATION_ERROR", "{uri}");
            assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
        }
    }

    #[tokio::test]
    async fn test_truncated_body_leaves_cart_untouched() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/rent/Figma/cart")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"durationId": "24""#))
            .unwrap();
        app.clone().oneshot(request).await.unwrap();

        let json = body_json(app.oneshot(get_req("/api/cart")).await.unwrap()).await;
        assert_eq!(json["totals"]["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_cart_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_req(
                Method::POST,
                "/api/rent/Figma%20Pro/cart",
                json!({"durationId": "6", "quantity": 2}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["notice"]["message"], "Added 2x Figma Pro (6 Hours) to cart!");
        assert_eq!(json["cart"]["totals"]["itemCount"], 1);
        let line_id = json["notice"]["item"]["id"].as_str().unwrap().to_string();

        let response = app.clone().oneshot(get_req("/api/cart")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["cart"]["items"][0]["durationHours"], 6);
        assert_eq!(
            json["totals"]["total"],
            json["cart"]["items"][0]["price"].as_i64().unwrap() * 6 * 9 / 10 * 2
        );
        assert_eq!(json["totals"]["savings"], 5_900 * 6 / 10 * 2);

        let remove = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/cart/{line_id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(remove).await.unwrap();
        assert_eq!(body_json(response).await["totals"]["itemCount"], 0);

        let remove_again = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/cart/{line_id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(remove_again).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["code"], "CART_ERROR");
        assert_eq!(json["message"], format!("Line {line_id} not in cart"));
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let app = app();
        let add = Request::builder()
            .method(Method::POST)
            .uri("/api/rent/ChatGPT%20Plus/cart")
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(add).await.unwrap();

        let clear = Request::builder()
            .method(Method::DELETE)
            .uri("/api/cart")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(clear).await.unwrap()).await;
        assert_eq!(json["totals"]["itemCount"], 0);
        assert_eq!(json["totals"]["total"], 0);
    }

    #[tokio::test]
    async fn test_checkout_approved() {
        let response = app()
            .oneshot(json_req(
                Method::POST,
                "/api/rent/Adobe%20Photoshop/checkout",
                json!({"durationId": "24", "quantity": 2}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        let payment_id = json["paymentId"].as_str().unwrap();
        assert!(payment_id.starts_with("PAY-"));
        assert!(json["message"].as_str().unwrap().contains(payment_id));
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Successfully rented 2x Adobe Photoshop (1 Day)!"));
    }

    #[tokio::test]
    async fn test_checkout_declined() {
        let mut config = StorefrontConfig::default();
        config.payment.mode = PaymentMode::Decline;
        let app = router(AppState::new(config));

        let response = app
            .oneshot(json_req(Method::POST, "/api/rent/Figma/checkout", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "failure");
        assert_eq!(json["failure"]["kind"], "message");
        assert_eq!(
            json["message"],
            "Payment failed: Payment declined by the sandbox gateway"
        );
    }

    #[tokio::test]
    async fn test_client_outcomes() {
        let cases = [
            (json!({"status": "success", "data": {"id": "PAY123"}}), "PAY123"),
            (json!({"status": "error", "error": "Declined"}), "Payment failed: Declined"),
            (
                json!({"status": "error", "error": {"message": "Card expired"}}),
                "Payment failed: Card expired",
            ),
            (
                json!({"status": "error", "error": 42}),
                "Payment failed. Please try again or add to cart.",
            ),
        ];

        for (outcome, expected) in cases {
            let response = app()
                .oneshot(json_req(
                    Method::POST,
                    "/api/rent/Adobe%20Photoshop/checkout/outcome",
                    json!({"outcome": outcome}),
                ))
                .await
                .unwrap();
            let json = body_json(response).await;
            assert!(
                json["message"].as_str().unwrap().contains(expected),
                "{json}"
            );
        }
    }

    async fn boom() -> &'static str {
        panic!("index out of bounds")
    }

    fn panicking_app(dev_mode: bool) -> Router {
        Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(PanicPage::new(dev_mode)))
    }

    #[tokio::test]
    async fn test_panic_boundary_hides_detail_outside_dev_mode() {
        let response = panicking_app(false).oneshot(get_req("/boom")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INTERNAL");
        assert!(json["message"].as_str().unwrap().starts_with("We encountered an error"));
        assert_eq!(json["title"], "Something went wrong!");
        assert_eq!(json["retry"]["label"], "Try Again");
        assert!(json.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_panic_boundary_shows_detail_in_dev_mode() {
        let response = panicking_app(true).oneshot(get_req("/boom")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["detail"], "index out of bounds");
    }
}
