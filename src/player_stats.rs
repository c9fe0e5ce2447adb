use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::dataset::parse_record_array;
use crate::json_fields::{number_or, string_or};

pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// One reporting period for a player, as found under `over_all_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatPeriod {
    pub matches_played: f64,
    pub raid_points_per_match: f64,
    pub tackle_points: f64,
    pub success_raid_percent: f64,
    pub total_points: f64,
    pub career_best_points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    /// `None` when the record carries no usable bio block.
    pub full_name: Option<String>,
    pub periods: Vec<StatPeriod>,
}

/// Flattened (player, period) row. Only periods with matches played are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatRow {
    pub player: String,
    pub matches_played: f64,
    pub raid_points_per_match: f64,
    pub tackle_points: f64,
    pub success_raid_percent: f64,
    pub total_points: f64,
    pub career_best_points: f64,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(default)]
    bio: Option<Value>,
    #[serde(default)]
    over_all_stats: Option<Vec<Value>>,
}

pub fn parse_player_records_json(raw: &str) -> Result<Vec<PlayerRecord>> {
    let rows: Vec<RawPlayer> = parse_record_array(raw, "player")?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| build_player_record(row).with_context(|| format!("player #{idx}")))
        .collect()
}

fn build_player_record(row: RawPlayer) -> Result<PlayerRecord> {
    let full_name = match row.bio {
        None => None,
        Some(bio) if is_blank(&bio) => None,
        Some(bio @ Value::Object(_)) => Some(string_or(&bio, "full_name", UNKNOWN_PLAYER)),
        Some(other) => return Err(anyhow!("bio is not an object: {other}")),
    };

    let periods = row
        .over_all_stats
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(idx, stat)| parse_stat_period(stat).with_context(|| format!("stat entry #{idx}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(PlayerRecord { full_name, periods })
}

/// Null, false, zero and empty strings, arrays or objects all count as no bio.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
    }
}

fn parse_stat_period(stat: &Value) -> Result<StatPeriod> {
    if !stat.is_object() {
        return Err(anyhow!("stat entry is not an object: {stat}"));
    }
    Ok(StatPeriod {
        matches_played: number_or(stat, "match_played", 0.0)?,
        raid_points_per_match: number_or(stat, "raid_points_per_match", 0.0)?,
        tackle_points: number_or(stat, "total_tackle_points", 0.0)?,
        success_raid_percent: number_or(stat, "success_raid_percent", 0.0)?,
        total_points: number_or(stat, "point", 0.0)?,
        career_best_points: number_or(stat, "career_best_points", 0.0)?,
    })
}

/// Flatten players into one row per played period, in input order.
/// Players without a bio contribute nothing.
pub fn flatten_player_stats(players: &[PlayerRecord]) -> Vec<PlayerStatRow> {
    let mut rows = Vec::new();
    for player in players {
        let Some(name) = player.full_name.as_deref() else {
            continue;
        };
        for period in player.periods.iter().filter(|p| p.matches_played > 0.0) {
            rows.push(PlayerStatRow {
                player: name.to_string(),
                matches_played: period.matches_played,
                raid_points_per_match: period.raid_points_per_match,
                tackle_points: period.tackle_points,
                success_raid_percent: period.success_raid_percent,
                total_points: period.total_points,
                career_best_points: period.career_best_points,
            });
        }
    }
    rows
}

/// Count of players dropped for lacking a bio block.
pub fn players_without_bio(players: &[PlayerRecord]) -> usize {
    players.iter().filter(|p| p.full_name.is_none()).count()
}
