pub mod agency;
pub mod clean;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod headsign;
pub mod labels;
pub mod model;
pub mod output;
pub mod stats;
pub mod stop_id;
