//! # Duration Catalog
//!
//! The fixed, ordered list of rental lengths a renter can pick from.
//!
//! ```text
//! ┌────────┬──────────┬────────────┬──────────┐
//! │ id     │ label    │ multiplier │ discount │
//! ├────────┼──────────┼────────────┼──────────┤
//! │ "1"    │ 1 Hour   │ 1          │ -        │
//! │ "3"    │ 3 Hours  │ 3          │ 5%       │
//! │ "6"    │ 6 Hours  │ 6          │ 10%      │
//! │ "12"   │ 12 Hours │ 12         │ 15%      │
//! │ "24"   │ 1 Day    │ 24         │ 20%      │
//! │ "168"  │ 1 Week   │ 168        │ 30%      │
//! └────────┴──────────┴────────────┴──────────┘
//! ```
//!
//! The catalog is a `static` slice and is never mutated at runtime.

use serde::Serialize;
use ts_rs::TS;

/// A selectable rental length with its hour multiplier and discount tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DurationOption {
    /// Identifier used by the frontend and in query strings.
    #[ts(type = "string")]
    pub id: &'static str,

    /// Display label ("1 Day").
    #[ts(type = "string")]
    pub label: &'static str,

    /// How many hourly rates this duration costs before discount.
    pub hour_multiplier: u32,

    /// Whole-percent discount; `None` for the undiscounted tier.
    pub discount_percent: Option<u8>,
}

impl DurationOption {
    /// Badge text shown on discounted duration buttons.
    ///
    /// ```rust
    /// use toolrent_core::duration;
    ///
    /// assert_eq!(duration::find("3").and_then(|d| d.badge()).as_deref(), Some("Save 5%"));
    /// assert_eq!(duration::default_option().badge(), None);
    /// ```
    pub fn badge(&self) -> Option<String> {
        match self.discount_percent {
            Some(pct) if pct > 0 => Some(format!("Save {}%", pct)),
            _ => None,
        }
    }
}

static CATALOG: [DurationOption; 6] = [
    DurationOption {
        id: "1",
        label: "1 Hour",
        hour_multiplier: 1,
        discount_percent: None,
    },
    DurationOption {
        id: "3",
        label: "3 Hours",
        hour_multiplier: 3,
        discount_percent: Some(5),
    },
    DurationOption {
        id: "6",
        label: "6 Hours",
        hour_multiplier: 6,
        discount_percent: Some(10),
    },
    DurationOption {
        id: "12",
        label: "12 Hours",
        hour_multiplier: 12,
        discount_percent: Some(15),
    },
    DurationOption {
        id: "24",
        label: "1 Day",
        hour_multiplier: 24,
        discount_percent: Some(20),
    },
    DurationOption {
        id: "168",
        label: "1 Week",
        hour_multiplier: 168,
        discount_percent: Some(30),
    },
];

/// Returns the catalog in display order.
pub fn list_durations() -> &'static [DurationOption] {
    &CATALOG
}

/// Looks up a duration by identifier.
pub fn find(id: &str) -> Option<&'static DurationOption> {
    CATALOG.iter().find(|d| d.id == id)
}

/// The first catalog entry; the selection falls back to it.
pub fn default_option() -> &'static DurationOption {
    &CATALOG[0]
}

/// Resolves a possibly missing or stale identifier, falling back to the
/// first entry.
pub fn resolve(id: Option<&str>) -> &'static DurationOption {
    id.and_then(find).unwrap_or_else(default_option)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_tiers() {
        let ids: Vec<_> = list_durations().iter().map(|d| d.id).collect();
        assert_eq!(ids, ["1", "3", "6", "12", "24", "168"]);

        let discounts: Vec<_> = list_durations().iter().map(|d| d.discount_percent).collect();
        assert_eq!(discounts, [None, Some(5), Some(10), Some(15), Some(20), Some(30)]);
    }

    #[test]
    fn test_ids_match_multipliers() {
        for option in list_durations() {
            assert_eq!(option.id, option.hour_multiplier.to_string());
            assert!(option.hour_multiplier > 0);
            assert!(option.discount_percent.unwrap_or(0) <= 100);
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("24").map(|d| d.label), Some("1 Day"));
        assert_eq!(find("168").map(|d| d.hour_multiplier), Some(168));
        assert!(find("2").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        assert_eq!(resolve(None).id, "1");
        assert_eq!(resolve(Some("bogus")).id, "1");
        assert_eq!(resolve(Some("6")).id, "6");
    }

    #[test]
    fn test_badges() {
        let badges: Vec<_> = list_durations().iter().map(|d| d.badge()).collect();
        assert_eq!(badges[0], None);
        assert_eq!(badges[5].as_deref(), Some("Save 30%"));
    }
}
