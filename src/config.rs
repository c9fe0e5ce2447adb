use std::path::PathBuf;

pub const DEFAULT_MATCH_FILE: &str = "stats_match.json";
pub const DEFAULT_PLAYER_FILE: &str = "stats_player.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub match_file: PathBuf,
    pub player_file: PathBuf,
    /// When false, charts are skipped and the computed tables are logged instead.
    pub show_charts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            match_file: PathBuf::from(DEFAULT_MATCH_FILE),
            player_file: PathBuf::from(DEFAULT_PLAYER_FILE),
            show_charts: true,
        }
    }
}

impl AppConfig {
    /// Load `.env.local` / `.env` if present, then read overrides from the environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path_var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            match_file: path_var("PKL_MATCH_FILE").unwrap_or(defaults.match_file),
            player_file: path_var("PKL_PLAYER_FILE").unwrap_or(defaults.player_file),
            show_charts: lookup("PKL_SHOW_CHARTS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.show_charts),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
