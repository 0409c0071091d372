//! Fatal data errors raised when the static agency tables do not cover the
//! live feed.
//!
//! None of these are recoverable by substituting a value: the caller either
//! aborts the run or drops the offending record.

use crate::model::{GRoute, GStop};

#[derive(Debug, thiserror::Error)]
pub enum AgencyError {
    #[error("Unexpected route color for {0}")]
    UnknownRouteColor(GRoute),

    #[error("Unexpected route long name for {0}")]
    UnknownRouteLongName(GRoute),

    #[error("Route short name is not a route number: {0}")]
    InvalidRouteShortName(GRoute),

    #[error("Stop doesn't have an ID: {stop} (stop code: '{code}')")]
    UnresolvableStopId { stop: GStop, code: String },

    #[error("Unexpected headsigns to merge on route {route_id}: '{first}' & '{second}'")]
    UnexpectedHeadsignMerge {
        route_id: u64,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, AgencyError>;
