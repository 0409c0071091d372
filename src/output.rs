//! Normalisation run and persistence of its results.
//!
//! Every record goes through the [`AgencyTools`] hooks first; files are only
//! written once the whole feed normalised, so a fatal record never leaves
//! partial output behind.

use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::agency::AgencyTools;
use crate::error::AgencyError;
use crate::feed::GtfsFeed;
use crate::model::{GRoute, MRoute, MStop, MTrip};
use crate::stats::RunStats;

/// What to do with a record the agency tables cannot resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnInvalid {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Drop the record and keep going.
    Skip,
}

#[derive(Debug, Default)]
pub struct NormalizedFeed {
    pub routes: Vec<MRoute>,
    pub stops: Vec<MStop>,
    pub trips: Vec<MTrip>,
    pub stats: RunStats,
}

/// Runs every route, trip, stop and calendar of `feed` through `agency`.
///
/// # Errors
///
/// With [`OnInvalid::Abort`], returns the first [`AgencyError`] raised by a hook.
#[tracing::instrument(skip(agency, feed))]
pub fn normalize_feed<A: AgencyTools>(
    agency: &A,
    feed: &GtfsFeed,
    on_invalid: OnInvalid,
) -> Result<NormalizedFeed> {
    let mut stats = RunStats::new();
    stats.routes_total = feed.routes.len();
    stats.trips_total = feed.trips.len();
    stats.stops_total = feed.stops.len();

    if agency.excluding_all() {
        warn!("No useful service in feed, excluding everything");
        return Ok(NormalizedFeed {
            stats,
            ..Default::default()
        });
    }

    // routes
    let mut route_ids: HashMap<&str, u64> = HashMap::new();
    let mut routes: BTreeMap<u64, MRoute> = BTreeMap::new();
    for route in &feed.routes {
        if agency.exclude_route(route) {
            stats.routes_excluded += 1;
            continue;
        }
        match normalize_route(agency, route) {
            Ok(m_route) => {
                route_ids.insert(route.route_id.as_str(), m_route.id);
                if let Entry::Vacant(slot) = routes.entry(m_route.id) {
                    slot.insert(m_route);
                } else {
                    debug!(route_id = %route.route_id, id = m_route.id, "Route shares an id, merged");
                }
            }
            Err(e) => skip_or_abort(e, on_invalid, &mut stats)?,
        }
    }

    // trips: one headsign per route and direction
    let mut headsigns: BTreeMap<(u64, u8), String> = BTreeMap::new();
    for trip in &feed.trips {
        let Some(&route_id) = route_ids.get(trip.route_id.as_str()) else {
            stats.trips_excluded += 1;
            continue;
        };
        if agency.exclude_trip(trip) {
            stats.trips_excluded += 1;
            continue;
        }

        let headsign = agency.clean_trip_headsign(&trip.trip_headsign);
        let direction_id = trip.direction_id.unwrap_or(0);
        match headsigns.entry((route_id, direction_id)) {
            Entry::Vacant(slot) => {
                slot.insert(headsign);
            }
            Entry::Occupied(mut slot) => {
                if *slot.get() == headsign {
                    continue;
                }
                match agency.merge_headsign(route_id, slot.get(), &headsign) {
                    Ok(merged) => {
                        debug!(route_id, direction_id, first = %slot.get(), second = %headsign, merged = %merged, "Headsigns merged");
                        stats.headsigns_merged += 1;
                        slot.insert(merged);
                    }
                    Err(e) => skip_or_abort(e, on_invalid, &mut stats)?,
                }
            }
        }
    }

    // stops
    let mut stops: BTreeMap<u32, MStop> = BTreeMap::new();
    for stop in &feed.stops {
        let id = match agency.stop_id(stop) {
            Ok(id) => id,
            Err(e) => {
                skip_or_abort(e, on_invalid, &mut stats)?;
                continue;
            }
        };
        if stops.contains_key(&id) {
            stats.duplicate_stop_ids += 1;
            warn!(id, original_id = %stop.stop_id, "Stop id already taken, stop dropped");
            continue;
        }
        stops.insert(
            id,
            MStop {
                id,
                code: agency.stop_code(stop),
                original_id: agency.clean_stop_original_id(&stop.stop_id),
                name: agency.clean_stop_name(&stop.stop_name),
                lat: stop.stop_lat,
                lon: stop.stop_lon,
            },
        );
    }

    // calendars
    stats.calendars_kept = feed
        .calendars
        .iter()
        .filter(|c| !agency.exclude_calendar(c))
        .count();
    stats.calendar_dates_kept = feed
        .calendar_dates
        .iter()
        .filter(|d| !agency.exclude_calendar_date(d))
        .count();

    let trips: Vec<MTrip> = headsigns
        .into_iter()
        .map(|((route_id, direction_id), headsign)| MTrip {
            route_id,
            direction_id,
            headsign,
        })
        .collect();

    stats.routes_written = routes.len();
    stats.trips_written = trips.len();
    stats.stops_written = stops.len();

    info!(
        routes = stats.routes_written,
        trips = stats.trips_written,
        stops = stats.stops_written,
        skipped = stats.records_skipped,
        routes_kept_pct = stats.routes_kept_pct(),
        "Feed normalized"
    );

    Ok(NormalizedFeed {
        routes: routes.into_values().collect(),
        stops: stops.into_values().collect(),
        trips,
        stats,
    })
}

fn normalize_route<A: AgencyTools>(agency: &A, route: &GRoute) -> Result<MRoute, AgencyError> {
    Ok(MRoute {
        id: agency.route_id(route)?,
        short_name: route.route_short_name.clone(),
        long_name: agency.route_long_name(route)?,
        color: agency.route_color(route)?,
    })
}

fn skip_or_abort(e: AgencyError, on_invalid: OnInvalid, stats: &mut RunStats) -> Result<()> {
    match on_invalid {
        OnInvalid::Abort => Err(e.into()),
        OnInvalid::Skip => {
            warn!(error = %e, "Record skipped");
            stats.records_skipped += 1;
            Ok(())
        }
    }
}

/// Writes `<prefix>routes.csv`, `<prefix>stops.csv` and `<prefix>trips.csv`
/// into `output_dir`, then appends the run stats to `<prefix>stats.csv`.
#[tracing::instrument(skip_all, fields(output_dir = %output_dir.display(), prefix = %prefix))]
pub fn write_feed(output_dir: &Path, prefix: &str, feed: &NormalizedFeed) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    write_records(&output_dir.join(format!("{prefix}routes.csv")), &feed.routes)?;
    write_records(&output_dir.join(format!("{prefix}stops.csv")), &feed.stops)?;
    write_records(&output_dir.join(format!("{prefix}trips.csv")), &feed.trips)?;
    append_record(&output_dir.join(format!("{prefix}stats.csv")), &feed.stats)?;

    info!("Output files written");
    Ok(())
}

/// Replaces the file at `path` with one CSV row per record.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(())
}

/// Logs run statistics as pretty-printed JSON.
pub fn print_json(stats: &RunStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Appends a [`RunStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, stats: &RunStats) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(stats)?;
    writer.flush()?;

    Ok(())
}
