//! GTFS input records and the normalised records produced from them.

use serde::{Deserialize, Serialize};

/// A row of `routes.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GRoute {
    pub route_id: String,
    #[serde(default)]
    pub agency_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: String,
    #[serde(default)]
    pub route_color: String,
}

/// A row of `stops.txt`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GStop {
    pub stop_id: String,
    #[serde(default)]
    pub stop_code: String,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default)]
    pub stop_lat: Option<f64>,
    #[serde(default)]
    pub stop_lon: Option<f64>,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GTrip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub trip_headsign: String,
    #[serde(default)]
    pub direction_id: Option<u8>,
}

/// A row of `calendar.txt`. Dates are `YYYYMMDD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GCalendar {
    pub service_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// A row of `calendar_dates.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GCalendarDate {
    pub service_id: String,
    pub date: String,
    pub exception_type: u8,
}

impl std::fmt::Display for GRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "route {} (short: '{}', long: '{}', agency: '{}')",
            self.route_id, self.route_short_name, self.route_long_name, self.agency_id
        )
    }
}

impl std::fmt::Display for GStop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "stop {} (code: '{}', name: '{}')",
            self.stop_id, self.stop_code, self.stop_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MRoute {
    pub id: u64,
    pub short_name: String,
    pub long_name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MStop {
    pub id: u32,
    pub code: String,
    pub original_id: String,
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// One headsign per route and direction, after merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MTrip {
    pub route_id: u64,
    pub direction_id: u8,
    pub headsign: String,
}
