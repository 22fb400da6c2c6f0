//! # Fallback Pages
//!
//! View models for the two static fallbacks: the not-found page (route did
//! not yield a tool) and the error page (an unhandled fault while rendering).

use serde::Serialize;
use ts_rs::TS;

use crate::tool::{suggested_tools, SuggestedTool};

pub const BROWSE_PATH: &str = "/browse";
pub const HOME_PATH: &str = "/";

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PageLink {
    pub label: String,
    pub href: String,
}

impl PageLink {
    fn new(label: &str, href: &str) -> Self {
        PageLink {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Shown when no tool could be resolved from the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NotFoundPage {
    pub title: String,
    pub message: String,
    pub links: Vec<PageLink>,
    pub suggestions_heading: String,
    pub suggestions: Vec<SuggestedTool>,
}

impl Default for NotFoundPage {
    fn default() -> Self {
        NotFoundPage {
            title: "Tool Not Found".to_string(),
            message: "The tool you're looking for doesn't exist or may have been moved."
                .to_string(),
            links: vec![
                PageLink::new("Browse All Tools", BROWSE_PATH),
                PageLink::new("Go Home", HOME_PATH),
            ],
            suggestions_heading: "Popular Tools You Might Like".to_string(),
            suggestions: suggested_tools(),
        }
    }
}

/// Retry reloads the view that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RetryAction {
    pub label: String,
}

/// Page-level error boundary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorPage {
    pub title: String,
    pub message: String,
    pub retry: RetryAction,
    pub browse: PageLink,
    /// Raw fault detail; present only in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorPage {
    /// Builds the view, dropping `detail` unless `dev_mode` is set.
    pub fn new(detail: impl Into<String>, dev_mode: bool) -> Self {
        let detail = detail.into();
        ErrorPage {
            title: "Something went wrong!".to_string(),
            message: "We encountered an error while loading this tool. Please try again."
                .to_string(),
            retry: RetryAction {
                label: "Try Again".to_string(),
            },
            browse: PageLink::new("Browse All Tools", BROWSE_PATH),
            detail: (dev_mode && !detail.is_empty()).then_some(detail),
        }
    }
}
