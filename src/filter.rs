//! Route, trip and calendar inclusion predicates.

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

use crate::config::AgencyConfig;
use crate::model::{GCalendar, GCalendarDate, GRoute, GTrip};

/// Returns `true` if `route` does not belong to this agency's output.
///
/// Rules are checked in order and the first match wins.
pub fn exclude_route(config: &AgencyConfig, route: &GRoute) -> bool {
    let short_name = route.route_short_name.as_str();
    let long_name = route.route_long_name.as_str();

    if config.excluded_short_names.iter().any(|s| s == short_name)
        || long_name
            .to_lowercase()
            .contains(&config.excluded_long_name_keyword)
    {
        debug!(route_id = %route.route_id, "Excluded route number or region");
        return true;
    }
    if short_name.contains(&config.excluded_brand) || long_name.contains(&config.excluded_brand) {
        debug!(route_id = %route.route_id, "Excluded brand");
        return true;
    }
    if config.excluded_long_names.iter().any(|l| l == long_name) {
        debug!(route_id = %route.route_id, "Excluded foreign route");
        return true;
    }
    if route.agency_id.contains(&config.agency_name) {
        return false;
    }
    if config.is_combined_feed(&route.agency_id) {
        let in_band = route_number(short_name)
            .is_some_and(|n| n >= config.route_number_band.0 && n <= config.route_number_band.1);
        if !in_band {
            debug!(route_id = %route.route_id, short_name, "Route number outside agency band");
        }
        return !in_band;
    }
    debug!(route_id = %route.route_id, agency_id = %route.agency_id, "Other agency");
    true
}

fn route_number(short_name: &str) -> Option<u32> {
    if short_name.is_empty() || !short_name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    short_name.parse().ok()
}

/// Service ids still worth exporting.
///
/// `None` means no calendar information was available and nothing is
/// filtered on service.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    service_ids: Option<HashSet<String>>,
}

impl ServiceFilter {
    pub fn new(service_ids: Option<HashSet<String>>) -> Self {
        Self { service_ids }
    }

    /// Nothing to export at all: calendars were given but none is useful.
    pub fn excluding_all(&self) -> bool {
        self.service_ids.as_ref().is_some_and(HashSet::is_empty)
    }

    pub fn exclude_trip(&self, trip: &GTrip) -> bool {
        self.exclude_service(&trip.service_id)
    }

    pub fn exclude_calendar(&self, calendar: &GCalendar) -> bool {
        self.exclude_service(&calendar.service_id)
    }

    pub fn exclude_calendar_date(&self, calendar_date: &GCalendarDate) -> bool {
        self.exclude_service(&calendar_date.service_id)
    }

    fn exclude_service(&self, service_id: &str) -> bool {
        self.service_ids
            .as_ref()
            .is_some_and(|ids| !ids.contains(service_id))
    }
}

/// Collects service ids running on or after `today`.
///
/// A service is useful if its calendar ends on or after `today`, or if a
/// calendar date adds service (`exception_type` 1) on or after `today`.
/// Returns `None` when the feed has neither calendar file.
pub fn useful_service_ids(
    calendars: &[GCalendar],
    calendar_dates: &[GCalendarDate],
    today: NaiveDate,
) -> Option<HashSet<String>> {
    if calendars.is_empty() && calendar_dates.is_empty() {
        return None;
    }

    let mut ids = HashSet::new();
    for calendar in calendars {
        if parse_gtfs_date(&calendar.end_date).is_some_and(|end| end >= today) {
            ids.insert(calendar.service_id.clone());
        }
    }
    for calendar_date in calendar_dates {
        if calendar_date.exception_type == 1
            && parse_gtfs_date(&calendar_date.date).is_some_and(|d| d >= today)
        {
            ids.insert(calendar_date.service_id.clone());
        }
    }
    debug!(useful = ids.len(), "Useful service ids");
    Some(ids)
}

pub fn parse_gtfs_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y%m%d").ok()
}
