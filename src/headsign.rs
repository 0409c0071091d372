//! Known pairs of cleaned headsigns that share a route and direction.

use crate::error::{AgencyError, Result};

#[derive(Debug, Clone, Copy)]
pub struct MergeRule {
    pub route_id: u64,
    pub headsigns: [&'static str; 2],
    pub merged: &'static str,
}

impl MergeRule {
    fn covers(&self, headsign: &str) -> bool {
        self.headsigns.iter().any(|h| *h == headsign)
    }
}

const fn rule(route_id: u64, headsigns: [&'static str; 2], merged: &'static str) -> MergeRule {
    MergeRule {
        route_id,
        headsigns,
        merged,
    }
}

pub static MERGE_RULES: &[MergeRule] = &[
    rule(102, ["NF Bus Terminal", "Main & Ferry Hub"], "Main & Ferry Hub"),
    rule(104, ["Bus Terminal", "Main & Ferry"], "Main & Ferry"),
    rule(104, ["NF Bus Terminal", "Main & Ferry Hub"], "Main & Ferry Hub"),
    rule(106, ["Inb1", "Main & Ferry"], "Main & Ferry"),
    rule(106, ["Gunning & Willloughby", "Main & Ferry Hub"], "Main & Ferry Hub"),
    rule(106, ["Aillanthus Ave", "Main & Ferr"], "Main & Ferr"),
    rule(108, ["Bus Term", "Bus Terminal"], "Bus Terminal"),
    rule(112, ["McLeod Rd", "Niagara Sq"], "Niagara Sq"),
    rule(112, ["Gunning & Willloughby", "Niagara Sq A"], "Niagara Sq A"),
    rule(113, ["Brown Rd Loop", "Niagara Squar"], "Niagara Squar"),
    rule(203, ["NF Bus Terminal", "Main & Ferry Hub"], "Main & Ferry Hub"),
    rule(204, ["NF Bus Terminal", "Main & Ferry Hub"], "Main & Ferry Hub"),
    rule(206, ["Main & Ferry", "Chippawa"], "Chippawa"),
    rule(206, ["Bus Terminal", "Main & Ferry"], "Main & Ferry"),
    rule(206, ["W Corner", "Portage Rd & Front St(Tims)"], "Portage Rd & Front St(Tims)"),
    rule(206, ["NF Bus Terminal", "Main & Ferry Hub"], "Main & Ferry Hub"),
];

/// Picks the single headsign kept for two trips of `route_id` heading the
/// same direction. Unknown pairs are fatal: they mean the rule table is stale.
pub fn merge_headsigns(route_id: u64, first: &str, second: &str) -> Result<String> {
    if first == second {
        return Ok(first.to_string());
    }
    MERGE_RULES
        .iter()
        .filter(|r| r.route_id == route_id)
        .find(|r| r.covers(first) && r.covers(second))
        .map(|r| r.merged.to_string())
        .ok_or_else(|| AgencyError::UnexpectedHeadsignMerge {
            route_id,
            first: first.to_string(),
            second: second.to_string(),
        })
}
