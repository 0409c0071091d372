use chrono::NaiveDate;
use nft_agency_tools::agency::NiagaraFallsTransit;
use nft_agency_tools::config::AgencyConfig;
use nft_agency_tools::feed::GtfsFeed;
use nft_agency_tools::filter::{ServiceFilter, useful_service_ids};
use nft_agency_tools::model::MTrip;
use nft_agency_tools::output::{NormalizedFeed, OnInvalid, normalize_feed, write_feed};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gtfs")
}

fn run(config: AgencyConfig) -> NormalizedFeed {
    let feed = GtfsFeed::load(&fixture_dir()).expect("Failed to load fixture feed");
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let services = ServiceFilter::new(useful_service_ids(&feed.calendars, &feed.calendar_dates, today));
    let agency = NiagaraFallsTransit::new(config).with_service_filter(services);
    normalize_feed(&agency, &feed, OnInvalid::Abort).expect("Failed to normalize feed")
}

#[test]
fn test_full_pipeline_routes() {
    let out = run(AgencyConfig::default());

    let routes: Vec<(u64, &str, &str)> = out
        .routes
        .iter()
        .map(|r| (r.id, r.long_name.as_str(), r.color.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![
            (101, "Dunn St", "F57215"),
            (104, "Victoria Ave", "19B5F1"),
            (205, "Kalar Rd", "ED1C24"),
        ]
    );
    assert_eq!(out.stats.routes_total, 9);
    assert_eq!(out.stats.routes_excluded, 6);
}

#[test]
fn test_full_pipeline_trips() {
    let out = run(AgencyConfig::default());

    let trip = |route_id, direction_id, headsign: &str| MTrip {
        route_id,
        direction_id,
        headsign: headsign.to_string(),
    };
    assert_eq!(
        out.trips,
        vec![
            trip(101, 0, "Main & Ferry"),
            trip(101, 1, "Bus Terminal"),
            trip(104, 0, "Main & Ferry"),
            trip(205, 1, "Chippawa"),
        ]
    );
    assert_eq!(out.stats.trips_excluded, 2);
    assert_eq!(out.stats.headsigns_merged, 1);
    assert_eq!(out.stats.calendars_kept, 1);
}

#[test]
fn test_full_pipeline_stops() {
    let out = run(AgencyConfig::default());

    let stops: Vec<(u32, &str)> = out.stops.iter().map(|s| (s.id, s.name.as_str())).collect();
    assert_eq!(
        stops,
        vec![
            (1234, "Main & Ferry"),
            (100_012, "Drummond Rd / McLeod Rd"),
            (200_012, "Drummond Rd / McLeod Rd"),
            (1_000_001, "Portage Rd & Burns"),
            (5_000_045, "Bus Terminal"),
        ]
    );
    assert_eq!(out.stats.duplicate_stop_ids, 0);
}

#[test]
fn test_config_narrows_combined_feed_band() {
    let config = AgencyConfig {
        route_number_band: (100, 199),
        ..Default::default()
    };
    let out = run(config);

    assert!(out.routes.iter().all(|r| r.id != 205));
    assert!(out.trips.iter().all(|t| t.route_id != 205));
}

#[test]
fn test_write_feed_outputs() {
    let out = run(AgencyConfig::default());
    let dir = std::env::temp_dir().join("nft_agency_tools_it_output");
    let _ = fs::remove_dir_all(&dir);

    write_feed(&dir, "nft_", &out).unwrap();

    let routes = fs::read_to_string(dir.join("nft_routes.csv")).unwrap();
    assert_eq!(routes.lines().count(), 4);
    assert!(routes.lines().any(|l| l == "205,205,Kalar Rd,ED1C24"));

    let trips = fs::read_to_string(dir.join("nft_trips.csv")).unwrap();
    assert!(trips.lines().any(|l| l == "205,1,Chippawa"));

    let stops = fs::read_to_string(dir.join("nft_stops.csv")).unwrap();
    assert_eq!(stops.lines().count(), 6);

    let stats = fs::read_to_string(dir.join("nft_stats.csv")).unwrap();
    assert_eq!(stats.lines().count(), 2);

    fs::remove_dir_all(&dir).unwrap();
}
