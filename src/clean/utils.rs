//! Label cleanup helpers shared by the stop name and headsign pipelines.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref VIA: Regex = Regex::new(r"(?i)\s+via\b.*$").unwrap();
    static ref STARTS_WITH_TO: Regex = Regex::new(r"(?i)^(.*\s)?to\s+").unwrap();

    static ref BOUND_IN_PARENTHESES: Regex =
        Regex::new(r"(?i)\s*\(\s*(north|south|east|west|in|out)\s*bound\s*\)").unwrap();
    static ref TRAILING_BOUND: Regex =
        Regex::new(r"(?i)\s+((north|south|east|west|in|out)bound|nb|sb|eb|wb)$").unwrap();

    static ref LEADING_NUMBER_MARKER: Regex = Regex::new(r"^\s*#?[0-9]+\s*[-:]\s*").unwrap();
    static ref TRAILING_NUMBER_TAG: Regex = Regex::new(r"(\s+#[0-9]+)+$").unwrap();

    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref MC_PREFIX: Regex = Regex::new(r"\bMc([a-z])").unwrap();
    static ref ACRONYMS: Regex = Regex::new(r"(?i)\b(nf|go|notl|ymca)\b").unwrap();

    /// Street type spellings mapped to one canonical abbreviation.
    static ref STREET_TYPES: Vec<(Regex, &'static str)> = [
        (r"street|str|st", "St"),
        (r"avenue|ave|av", "Ave"),
        (r"road|rd", "Rd"),
        (r"boulevard|blvd", "Blvd"),
        (r"drive|dr", "Dr"),
        (r"plaza|plz", "Plz"),
        (r"square|sq", "Sq"),
        (r"crescent|cres", "Cres"),
        (r"court|ct", "Ct"),
        (r"lane|ln", "Ln"),
        (r"parkway|pkwy", "Pkwy"),
        (r"terrace|ter", "Ter"),
        (r"highway|hwy", "Hwy"),
        (r"centre|center|ctr", "Ctr"),
    ]
    .iter()
    .map(|(spellings, canonical)| {
        (Regex::new(&format!(r"(?i)\b({spellings})\b\.?")).unwrap(), *canonical)
    })
    .collect();
}

/// Uppercases the first character of each whitespace-delimited word and
/// lowercases the rest. ASCII only; other characters pass through.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Keeps the destination of `A to B via C`, i.e. `B`.
pub fn keep_to_and_remove_via(input: &str) -> String {
    let without_via = VIA.replace(input, "");
    STARTS_WITH_TO.replace(&without_via, "").into_owned()
}

/// Drops direction qualifiers such as `(Eastbound)` or a trailing `NB`.
pub fn clean_bounds(input: &str) -> String {
    let without_group = BOUND_IN_PARENTHESES.replace_all(input, "");
    TRAILING_BOUND.replace(&without_group, "").into_owned()
}

pub fn clean_street_types(input: &str) -> String {
    STREET_TYPES
        .iter()
        .fold(input.to_string(), |acc, (regex, canonical)| {
            regex.replace_all(&acc, *canonical).into_owned()
        })
}

/// Drops sequence markers (`12 - `, `#3: `) and trailing `#n` tags.
pub fn clean_numbers(input: &str) -> String {
    let without_marker = LEADING_NUMBER_MARKER.replace(input, "");
    TRAILING_NUMBER_TAG.replace(&without_marker, "").into_owned()
}

/// Final label pass: whitespace, stray separators at both ends, casing.
pub fn clean_label(input: &str) -> String {
    let collapsed = SPACES.replace_all(input, " ");
    let trimmed = collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | '/' | '&'));

    let mut label = String::with_capacity(trimmed.len());
    let mut prev: Option<char> = None;
    for c in trimmed.chars() {
        if prev.is_none_or(|p| matches!(p, ' ' | '/' | '(' | '-')) {
            label.push(c.to_ascii_uppercase());
        } else {
            label.push(c);
        }
        prev = Some(c);
    }

    let label = MC_PREFIX.replace_all(&label, |caps: &Captures| {
        format!("Mc{}", caps[1].to_ascii_uppercase())
    });
    ACRONYMS
        .replace_all(&label, |caps: &Captures| caps[1].to_ascii_uppercase())
        .into_owned()
}
