use anyhow::{Context, Result};
use serde::Deserialize;

/// Route filtering settings for the Niagara Falls Transit feed.
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides:
/// ```json
/// {
///   "combined_feed_prefix": "AllNRT_",
///   "route_number_band": [100, 299]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    /// Substring of the agency id identifying this agency's routes.
    pub agency_name: String,
    /// Non-revenue or duplicate route numbers.
    pub excluded_short_names: Vec<String>,
    /// Lowercase keyword marking a neighbouring region's routes.
    pub excluded_long_name_keyword: String,
    /// Brand sharing the feed with a different product line.
    pub excluded_brand: String,
    /// Exact long names of known foreign routes.
    pub excluded_long_names: Vec<String>,
    pub combined_feed_prefix: String,
    pub combined_feed_agency_id: String,
    /// Inclusive route number range reserved for this agency in the combined feed.
    pub route_number_band: (u32, u32),
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self {
            agency_name: "Niagara Falls Transit".to_string(),
            excluded_short_names: vec!["22".to_string()],
            excluded_long_name_keyword: "erie".to_string(),
            excluded_brand: "WEGO".to_string(),
            excluded_long_names: vec!["604 - Orange - NOTL".to_string()],
            combined_feed_prefix: "AllNRT_".to_string(),
            combined_feed_agency_id: "NRT".to_string(),
            route_number_band: (100, 299),
        }
    }
}

impl AgencyConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read agency config '{path}'"))?;
        let config: AgencyConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid agency config '{path}'"))?;
        Ok(config)
    }

    pub fn is_combined_feed(&self, agency_id: &str) -> bool {
        agency_id.starts_with(&self.combined_feed_prefix) || agency_id == self.combined_feed_agency_id
    }
}
