//! # Tool Listings
//!
//! Static listing data for rentable tools.
//!
//! There is no product database: every tool page shows the same mock
//! metadata under the name taken from the route, and the not-found view
//! suggests a fixed trio of popular tools.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::route::rent_path;

/// Hourly rate used for every mock listing.
pub const MOCK_HOURLY_RATE: Money = Money::from_rupees(59);

const MOCK_CATEGORY: &str = "Creative Software";
const MOCK_LOGO: &str = "/logos/After effects.PNG";
const MOCK_DESCRIPTION: &str = "Professional photo editing and graphic design software \
     used by millions of creatives worldwide.";
const MOCK_FEATURES: [&str; 6] = [
    "Advanced photo editing tools",
    "Layer-based editing",
    "Professional filters and effects",
    "Cloud sync and storage",
    "24/7 customer support",
    "Regular updates and new features",
];

/// Metadata shown on a tool's rental page and copied into cart lines.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToolListing {
    /// Display name (the decoded route identifier).
    pub name: String,
    pub hourly_rate: Money,
    pub category: String,
    pub rating: f32,
    /// Pre-formatted user count ("2.1k").
    pub users: String,
    pub description: String,
    pub features: Vec<String>,
    pub logo: String,
}

impl ToolListing {
    /// Builds the mock listing for a resolved tool name.
    pub fn mock(name: impl Into<String>) -> Self {
        ToolListing {
            name: name.into(),
            hourly_rate: MOCK_HOURLY_RATE,
            category: MOCK_CATEGORY.to_string(),
            rating: 4.9,
            users: "2.1k".to_string(),
            description: MOCK_DESCRIPTION.to_string(),
            features: MOCK_FEATURES.iter().map(|f| f.to_string()).collect(),
            logo: MOCK_LOGO.to_string(),
        }
    }
}

/// A tool suggested on the not-found view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SuggestedTool {
    pub name: String,
    pub hourly_rate: Money,
    /// "₹59/hr"
    pub price_label: String,
    /// Percent-encoded link to the tool's rental page.
    pub rent_path: String,
}

impl SuggestedTool {
    fn new(name: &str, rupees_per_hour: i64) -> Self {
        let hourly_rate = Money::from_rupees(rupees_per_hour);
        SuggestedTool {
            name: name.to_string(),
            hourly_rate,
            price_label: format!("₹{}/hr", hourly_rate.rupees()),
            rent_path: rent_path(name),
        }
    }
}

/// Popular tools offered when a requested tool cannot be found.
pub fn suggested_tools() -> Vec<SuggestedTool> {
    vec![
        SuggestedTool::new("Adobe Photoshop", 59),
        SuggestedTool::new("Figma Pro", 35),
        SuggestedTool::new("ChatGPT Plus", 29),
    ]
}
