pub mod analysis;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod insights;
pub mod json_fields;
pub mod logging;
pub mod player_stats;
pub mod team_stats;
pub mod viewer;
