//! Stop name and trip headsign cleanup.
//!
//! Both cleanups are ordered [`Pipeline`]s of rewrite steps. Later steps rely
//! on the earlier ones, e.g. the route number prefix is only stripped after
//! title casing and the street types are only canonicalised once junctions
//! and directions are normalised.

pub mod pipeline;
pub mod utils;

use lazy_static::lazy_static;

pub use pipeline::{Pipeline, Step};

lazy_static! {
    pub static ref HEADSIGN_PIPELINE: Pipeline = Pipeline::new(vec![
        and_no_space(),
        Step::regex(
            "arrow_terminal",
            r"(?i)^.*-\s*>\s*(bus\s+)?terminal\b.*$",
            "Bus Terminal",
        ),
        Step::func("title_case", utils::title_case),
        Step::regex("starts_with_route_number", r"^[0-9]+(\s+|$)", ""),
        Step::regex("starts_with_dash_prefix", r"^.*-\s*", ""),
        square_typo(),
        Step::func("keep_to_remove_via", utils::keep_to_and_remove_via),
        leading_arrows(),
        clean_and(),
        Step::func("bound_qualifiers", utils::clean_bounds),
        Step::func("street_types", utils::clean_street_types),
        slashes(),
        Step::func("numbers", utils::clean_numbers),
        Step::func("label", utils::clean_label),
    ]);

    pub static ref STOP_NAME_PIPELINE: Pipeline = Pipeline::new(vec![
        and_no_space(),
        Step::regex("clean_at", r"(?i)\s*(@|\bat\b)\s*", " / "),
        Step::func("title_case", utils::title_case),
        square_typo(),
        leading_arrows(),
        clean_and(),
        Step::func("bound_qualifiers", utils::clean_bounds),
        Step::func("street_types", utils::clean_street_types),
        slashes(),
        Step::func("numbers", utils::clean_numbers),
        Step::func("label", utils::clean_label),
    ]);
}

fn and_no_space() -> Step {
    Step::regex("and_no_space", r"(\S)([&@])(\S)", "${1} ${2} ${3}")
}

fn square_typo() -> Step {
    Step::regex("square_typo", r"(?i)(^|\W)sqaure(\W|$)", "${1}Square${2}")
}

fn leading_arrows() -> Step {
    Step::regex("leading_arrows", r"^\s*[<>=\-]*[<>]+\s*", "")
}

fn clean_and() -> Step {
    Step::regex("clean_and", r"(?i)\s*(&|\band\b)\s*", " & ")
}

fn slashes() -> Step {
    Step::regex("slashes", r"\s*/\s*", " / ")
}

pub fn clean_trip_headsign(headsign: &str) -> String {
    HEADSIGN_PIPELINE.apply(headsign)
}

pub fn clean_stop_name(stop_name: &str) -> String {
    STOP_NAME_PIPELINE.apply(stop_name)
}
