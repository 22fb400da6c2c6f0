//! # Route Identifiers
//!
//! Tool names travel in the URL as one percent-encoded path segment:
//!
//! ```text
//! /rent/Adobe%20Photoshop  ──decode──►  "Adobe Photoshop"
//! "Figma Pro"              ──encode──►  /rent/Figma%20Pro
//! ```
//!
//! Decoding follows `decodeURIComponent`: every `%` must start a two-digit
//! hex escape and the decoded bytes must be UTF-8. Encoding keeps the same
//! unreserved set as `encodeURIComponent`.

use std::fmt;
use std::future::IntoFuture;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::RouteError;
use crate::validation::validate_tool_name;

/// Path prefix of the rental page.
pub const RENT_PREFIX: &str = "/rent/";

/// Characters `encodeURIComponent` leaves alone besides alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Parameters captured from the rental route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Raw (still percent-encoded) tool segment.
    pub tool_name: Option<String>,
}

impl RouteParams {
    pub fn new(raw: impl Into<String>) -> Self {
        RouteParams {
            tool_name: Some(raw.into()),
        }
    }
}

/// Decodes one percent-encoded route segment.
///
/// ```rust
/// use toolrent_core::route::decode_tool_name;
///
/// assert_eq!(decode_tool_name("Adobe%20Photoshop").unwrap(), "Adobe Photoshop");
/// assert!(decode_tool_name("%E0%A4%A").is_err());
/// ```
pub fn decode_tool_name(raw: &str) -> Result<String, RouteError> {
    check_escapes(raw)?;

    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| RouteError::InvalidUtf8)?;

    if decoded.trim().is_empty() {
        return Err(RouteError::Blank);
    }

    Ok(decoded.into_owned())
}

/// Encodes a tool name as a single path segment.
pub fn encode_tool_name(name: &str) -> String {
    utf8_percent_encode(name, COMPONENT).to_string()
}

/// Link to a tool's rental page.
pub fn rent_path(name: &str) -> String {
    format!("{}{}", RENT_PREFIX, encode_tool_name(name))
}

/// Resolves the route parameters once and yields the decoded tool name.
///
/// The parameters arrive as a single-shot future; a failure to obtain them
/// is reported as [`RouteError::Unavailable`].
pub async fn resolve_tool_name<F, E>(params: F) -> Result<String, RouteError>
where
    F: IntoFuture<Output = Result<RouteParams, E>>,
    E: fmt::Display,
{
    let params = params
        .await
        .map_err(|e| RouteError::Unavailable(e.to_string()))?;

    let raw = params.tool_name.ok_or(RouteError::Missing)?;
    let name = decode_tool_name(&raw)?;
    validate_tool_name(&name).map_err(RouteError::Invalid)?;

    Ok(name)
}

/// Rejects `%` not followed by two hex digits.
fn check_escapes(raw: &str) -> Result<(), RouteError> {
    let bytes = raw.as_bytes();
    for (position, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let valid = bytes
            .get(position + 1..position + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(RouteError::MalformedEscape { position });
        }
    }
    Ok(())
}
