//! Reader for an extracted GTFS directory.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use crate::model::{GCalendar, GCalendarDate, GRoute, GStop, GTrip};

#[derive(Debug, Default)]
pub struct GtfsFeed {
    pub routes: Vec<GRoute>,
    pub stops: Vec<GStop>,
    pub trips: Vec<GTrip>,
    pub calendars: Vec<GCalendar>,
    pub calendar_dates: Vec<GCalendarDate>,
}

impl GtfsFeed {
    /// Loads `routes.txt`, `stops.txt`, `trips.txt` and, when present,
    /// `calendar.txt` and `calendar_dates.txt` from `dir`.
    ///
    /// # Errors
    ///
    /// Fails if `dir` is not a directory, a required file is missing, or a
    /// row does not deserialize.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!(
                "GTFS input '{}' is not a directory; extract the feed first",
                dir.display()
            );
        }

        let feed = GtfsFeed {
            routes: read_table(&dir.join("routes.txt"))?,
            stops: read_table(&dir.join("stops.txt"))?,
            trips: read_table(&dir.join("trips.txt"))?,
            calendars: read_optional_table(&dir.join("calendar.txt"))?,
            calendar_dates: read_optional_table(&dir.join("calendar_dates.txt"))?,
        };

        info!(
            routes = feed.routes.len(),
            stops = feed.stops.len(),
            trips = feed.trips.len(),
            calendars = feed.calendars.len(),
            calendar_dates = feed.calendar_dates.len(),
            "GTFS feed loaded"
        );
        Ok(feed)
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("invalid row in {}", path.display()))?);
    }
    debug!(path = %path.display(), rows = rows.len(), "Table read");
    Ok(rows)
}

fn read_optional_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "Optional table missing");
        return Ok(Vec::new());
    }
    read_table(path)
}
