//! Static routes and the two fallback views.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tower_http::catch_panic::ResponseForPanic;
use toolrent_core::duration::{list_durations, DurationOption};
use toolrent_core::pages::{ErrorPage, NotFoundPage};
use tracing::error;

use crate::error::ErrorCode;

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    "OK"
}

pub async fn durations() -> Json<&'static [DurationOption]> {
    Json(list_durations())
}

/// Any unmatched path.
pub async fn fallback() -> NotFoundView {
    NotFoundView
}

/// 404 with the not-found page body.
#[derive(Debug, Clone, Copy)]
pub struct NotFoundView;

impl IntoResponse for NotFoundView {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(NotFoundPage::default())).into_response()
    }
}

/// Error page body: the usual `{code, message}` pair plus the page copy.
#[derive(Debug, Clone, Serialize)]
pub struct FaultView {
    pub code: ErrorCode,
    #[serde(flatten)]
    pub page: ErrorPage,
}

/// Renders a handler panic as the error page.
#[derive(Debug, Clone, Copy)]
pub struct PanicPage {
    dev_mode: bool,
}

impl PanicPage {
    pub fn new(dev_mode: bool) -> Self {
        PanicPage { dev_mode }
    }
}

impl ResponseForPanic for PanicPage {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic payload".to_string()
        };

        error!(%detail, "Handler panicked");
        let code = ErrorCode::Internal;
        let view = FaultView {
            code,
            page: ErrorPage::new(detail, self.dev_mode),
        };
        (code.status(), Json(view)).into_response()
    }
}
