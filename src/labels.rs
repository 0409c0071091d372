//! Route ids, colors and long names.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AgencyError, Result};
use crate::model::GRoute;

/// Agency green, from the printed service schedule.
pub const AGENCY_COLOR: &str = "B2DA18";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLabel {
    pub number: u64,
    pub color: &'static str,
    pub long_name: &'static str,
}

const fn label(number: u64, color: &'static str, long_name: &'static str) -> RouteLabel {
    RouteLabel {
        number,
        color,
        long_name,
    }
}

/// Labels used when the feed leaves route color or long name blank.
///
/// Covers the 100s and the 200s numbering. A route number missing here means
/// the table is stale relative to the feed.
pub static ROUTE_LABELS: &[RouteLabel] = &[
    label(101, "F57215", "Dunn St"),
    label(102, "2E3192", "Morrison & Dorchester"),
    label(103, "EC008C", "Drummond Rd"),
    label(104, "19B5F1", "Victoria Ave"),
    label(105, "ED1C24", "Kalar Rd"),
    label(106, "BAA202", "Ailanthus Ave"),
    label(107, "A05843", "Town & County Plz"),
    label(108, "008940", "Thorold Stone Rd"),
    label(109, "66E530", "Thorold Stone Rd"),
    label(110, "4372C2", "Drummond Rd"),
    label(111, "F24D3E", "Dorchester Rd"),
    label(112, "9E50AE", "McLeod Rd"),
    label(113, "724A36", "Montrose Rd"),
    label(114, "B30E8E", "Town & County Plz"),
    //
    label(203, "EC008C", "Drummond Rd"),
    label(204, "19B5F1", "Victoria Ave"),
    label(205, "ED1C24", "Kalar Rd"),
    label(206, "BAA202", "Ailanthus Ave"),
    //
    label(209, "66C530", "Thorold Stone Rd"),
    label(210, "4372C2", "Hospital"),
    label(211, "F24D3E", "Dorchester Rd"),
    //
    label(213, "724A36", "Montrose Rd"),
    label(214, "B30E8E", "Town & County Plz"),
];

lazy_static! {
    static ref STARTS_WITH_ROUTE_RID: Regex = Regex::new(r"(?i)^(rte|route) \d+").unwrap();
}

pub fn find_label(number: u64) -> Option<&'static RouteLabel> {
    ROUTE_LABELS.iter().find(|l| l.number == number)
}

/// The route short name doubles as the route id.
pub fn route_id(route: &GRoute) -> Result<u64> {
    route
        .route_short_name
        .trim()
        .parse()
        .map_err(|_| AgencyError::InvalidRouteShortName(route.clone()))
}

/// Returns the feed color when present, else the table color.
pub fn route_color(route: &GRoute) -> Result<String> {
    if !route.route_color.trim().is_empty() {
        return Ok(route.route_color.clone());
    }
    route_id(route)
        .ok()
        .and_then(find_label)
        .map(|l| l.color.to_string())
        .ok_or_else(|| AgencyError::UnknownRouteColor(route.clone()))
}

/// Strips a leading `Route <n>` / `Rte <n>` marker from a feed long name.
pub fn clean_route_long_name(long_name: &str) -> String {
    STARTS_WITH_ROUTE_RID.replace(long_name, "").into_owned()
}

/// Returns the cleaned feed long name when non-blank, else the table name.
pub fn route_long_name(route: &GRoute) -> Result<String> {
    let long_name = clean_route_long_name(&route.route_long_name);
    let long_name = long_name.trim();
    if !long_name.is_empty() {
        return Ok(long_name.to_string());
    }
    route_id(route)
        .ok()
        .and_then(find_label)
        .map(|l| l.long_name.to_string())
        .ok_or_else(|| AgencyError::UnknownRouteLongName(route.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn route(short_name: &str) -> GRoute {
        GRoute {
            route_id: short_name.to_string(),
            route_short_name: short_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_has_unique_numbers() {
        let numbers: HashSet<u64> = ROUTE_LABELS.iter().map(|l| l.number).collect();
        assert_eq!(numbers.len(), ROUTE_LABELS.len());
        assert_eq!(ROUTE_LABELS.len(), 23);
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for l in ROUTE_LABELS {
            let r = route(&l.number.to_string());
            assert_eq!(route_color(&r).unwrap(), l.color);
            assert_eq!(route_long_name(&r).unwrap(), l.long_name);
        }
    }

    #[test]
    fn test_colors_are_hex() {
        for l in ROUTE_LABELS {
            assert_eq!(l.color.len(), 6);
            assert!(l.color.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_feed_color_wins() {
        let mut r = route("999");
        r.route_color = "123456".to_string();
        assert_eq!(route_color(&r).unwrap(), "123456");
    }

    #[test]
    fn test_unknown_route_is_fatal() {
        let r = route("212");
        assert!(matches!(route_color(&r), Err(AgencyError::UnknownRouteColor(ref x)) if x.route_short_name == "212"));
        assert!(matches!(route_long_name(&r), Err(AgencyError::UnknownRouteLongName(_))));
    }

    #[test]
    fn test_non_numeric_short_name_is_fatal() {
        let r = route("A1");
        assert!(matches!(route_color(&r), Err(AgencyError::UnknownRouteColor(_))));
        assert!(matches!(route_id(&r), Err(AgencyError::InvalidRouteShortName(_))));
    }

    #[test]
    fn test_long_name_route_prefix_stripped() {
        let mut r = route("104");
        r.route_long_name = "Route 104".to_string();
        assert_eq!(route_long_name(&r).unwrap(), "Victoria Ave");

        r.route_long_name = "RTE 104".to_string();
        assert_eq!(route_long_name(&r).unwrap(), "Victoria Ave");

        r.route_long_name = "Victoria Avenue".to_string();
        assert_eq!(route_long_name(&r).unwrap(), "Victoria Avenue");
    }

    #[test]
    fn test_long_name_remainder_trimmed() {
        let mut r = route("999");
        r.route_long_name = "Route 999 Casino Shuttle ".to_string();
        assert_eq!(route_long_name(&r).unwrap(), "Casino Shuttle");
    }

    #[test]
    fn test_route_id() {
        assert_eq!(route_id(&route("205")).unwrap(), 205);
    }
}
