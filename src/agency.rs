//! The per-agency hooks called for every GTFS record.
//!
//! [`AgencyTools`] default methods pass feed values through untouched.
//! [`NiagaraFallsTransit`] overrides them with this agency's rules.

use crate::clean;
use crate::config::AgencyConfig;
use crate::error::{AgencyError, Result};
use crate::filter::{self, ServiceFilter};
use crate::headsign;
use crate::labels;
use crate::model::{GCalendar, GCalendarDate, GRoute, GStop, GTrip};
use crate::stop_id;

pub trait AgencyTools {
    fn agency_color(&self) -> Option<&str> {
        None
    }

    fn excluding_all(&self) -> bool {
        false
    }

    fn exclude_route(&self, _route: &GRoute) -> bool {
        false
    }

    fn exclude_trip(&self, _trip: &GTrip) -> bool {
        false
    }

    fn exclude_calendar(&self, _calendar: &GCalendar) -> bool {
        false
    }

    fn exclude_calendar_date(&self, _calendar_date: &GCalendarDate) -> bool {
        false
    }

    fn route_id(&self, route: &GRoute) -> Result<u64> {
        route
            .route_id
            .parse()
            .map_err(|_| AgencyError::InvalidRouteShortName(route.clone()))
    }

    fn route_color(&self, route: &GRoute) -> Result<String> {
        Ok(route.route_color.clone())
    }

    fn route_long_name(&self, route: &GRoute) -> Result<String> {
        Ok(route.route_long_name.clone())
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        headsign.trim().to_string()
    }

    fn clean_stop_name(&self, stop_name: &str) -> String {
        stop_name.trim().to_string()
    }

    fn stop_code(&self, stop: &GStop) -> String {
        stop.stop_code.clone()
    }

    fn clean_stop_original_id(&self, original_id: &str) -> String {
        original_id.to_string()
    }

    fn stop_id(&self, stop: &GStop) -> Result<u32> {
        stop.stop_id
            .parse()
            .map_err(|_| AgencyError::UnresolvableStopId {
                stop: stop.clone(),
                code: stop.stop_id.clone(),
            })
    }

    /// Called when two trips of a route and direction carry different headsigns.
    fn merge_headsign(&self, route_id: u64, first: &str, second: &str) -> Result<String> {
        Err(AgencyError::UnexpectedHeadsignMerge {
            route_id,
            first: first.to_string(),
            second: second.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiagaraFallsTransit {
    config: AgencyConfig,
    services: ServiceFilter,
}

impl NiagaraFallsTransit {
    pub fn new(config: AgencyConfig) -> Self {
        Self {
            config,
            services: ServiceFilter::default(),
        }
    }

    pub fn with_service_filter(mut self, services: ServiceFilter) -> Self {
        self.services = services;
        self
    }
}

impl AgencyTools for NiagaraFallsTransit {
    fn agency_color(&self) -> Option<&str> {
        Some(labels::AGENCY_COLOR)
    }

    fn excluding_all(&self) -> bool {
        self.services.excluding_all()
    }

    fn exclude_route(&self, route: &GRoute) -> bool {
        filter::exclude_route(&self.config, route)
    }

    fn exclude_trip(&self, trip: &GTrip) -> bool {
        self.services.exclude_trip(trip)
    }

    fn exclude_calendar(&self, calendar: &GCalendar) -> bool {
        self.services.exclude_calendar(calendar)
    }

    fn exclude_calendar_date(&self, calendar_date: &GCalendarDate) -> bool {
        self.services.exclude_calendar_date(calendar_date)
    }

    fn route_id(&self, route: &GRoute) -> Result<u64> {
        labels::route_id(route)
    }

    fn route_color(&self, route: &GRoute) -> Result<String> {
        labels::route_color(route)
    }

    fn route_long_name(&self, route: &GRoute) -> Result<String> {
        labels::route_long_name(route)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        clean::clean_trip_headsign(headsign)
    }

    fn clean_stop_name(&self, stop_name: &str) -> String {
        clean::clean_stop_name(stop_name)
    }

    fn stop_code(&self, stop: &GStop) -> String {
        stop_id::stop_code(stop)
    }

    fn clean_stop_original_id(&self, original_id: &str) -> String {
        stop_id::clean_stop_original_id(original_id)
    }

    fn stop_id(&self, stop: &GStop) -> Result<u32> {
        stop_id::stop_id(stop)
    }

    fn merge_headsign(&self, route_id: u64, first: &str, second: &str) -> Result<String> {
        headsign::merge_headsigns(route_id, first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct PassThrough;

    impl AgencyTools for PassThrough {}

    #[test]
    fn test_default_hooks_pass_through() {
        let agency = PassThrough;
        let route = GRoute {
            route_id: "7".to_string(),
            route_short_name: "X".to_string(),
            route_long_name: "Route 7 Local".to_string(),
            ..Default::default()
        };
        assert!(!agency.exclude_route(&route));
        assert_eq!(agency.route_id(&route).unwrap(), 7);
        assert_eq!(agency.route_color(&route).unwrap(), "");
        assert_eq!(agency.route_long_name(&route).unwrap(), "Route 7 Local");
        assert_eq!(agency.clean_trip_headsign(" Downtown "), "Downtown");
        assert!(agency.merge_headsign(7, "A", "B").is_err());
        assert_eq!(agency.agency_color(), None);
    }

    #[test]
    fn test_default_stop_id_requires_numeric_id() {
        let agency = PassThrough;
        let stop = GStop {
            stop_id: "12a".to_string(),
            ..Default::default()
        };
        assert!(agency.stop_id(&stop).is_err());
    }

    #[test]
    fn test_agency_overrides() {
        let agency = NiagaraFallsTransit::default();
        let route = GRoute {
            route_id: "abc".to_string(),
            agency_id: "Niagara Falls Transit".to_string(),
            route_short_name: "104".to_string(),
            route_long_name: "Route 104".to_string(),
            ..Default::default()
        };
        assert!(!agency.exclude_route(&route));
        assert_eq!(agency.route_id(&route).unwrap(), 104);
        assert_eq!(agency.route_color(&route).unwrap(), "19B5F1");
        assert_eq!(agency.route_long_name(&route).unwrap(), "Victoria Ave");
        assert_eq!(agency.agency_color(), Some("B2DA18"));

        let stop = GStop {
            stop_id: "nf_A12_12a".to_string(),
            stop_code: "0".to_string(),
            ..Default::default()
        };
        assert_eq!(agency.stop_id(&stop).unwrap(), 100_012);
        assert_eq!(agency.stop_code(&stop), "");
        assert_eq!(agency.clean_stop_original_id(&stop.stop_id), "12a");
    }

    #[test]
    fn test_agency_service_filter() {
        let ids: HashSet<String> = HashSet::new();
        let agency = NiagaraFallsTransit::default().with_service_filter(ServiceFilter::new(Some(ids)));
        assert!(agency.excluding_all());
        let trip = GTrip {
            service_id: "WKD".to_string(),
            ..Default::default()
        };
        assert!(agency.exclude_trip(&trip));
    }
}
