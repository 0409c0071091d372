use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for one normalisation run, appended as a CSV row per run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub timestamp: DateTime<Utc>,
    pub input: Option<String>,
    pub file_prefix: Option<String>,

    // routes
    pub routes_total: usize,
    pub routes_excluded: usize,
    pub routes_written: usize,

    // trips
    pub trips_total: usize,
    pub trips_excluded: usize,
    pub headsigns_merged: usize,
    pub trips_written: usize,

    // stops
    pub stops_total: usize,
    pub stops_written: usize,
    pub duplicate_stop_ids: usize,

    // calendars
    pub calendars_kept: usize,
    pub calendar_dates_kept: usize,

    /// Records dropped because the static tables could not resolve them.
    pub records_skipped: usize,
}

impl RunStats {
    pub fn new() -> Self {
        RunStats {
            timestamp: Utc::now(),
            ..Default::default()
        }
    }

    /// Set run metadata (input path and output file prefix)
    pub fn with_run_info(mut self, input: &str, file_prefix: &str) -> Self {
        self.input = Some(input.to_string());
        self.file_prefix = Some(file_prefix.to_string());
        self
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn routes_kept_pct(&self) -> f64 {
        Self::pct(self.routes_written, self.routes_total)
    }
}
