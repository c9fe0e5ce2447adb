use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::dataset::parse_record_array;
use crate::json_fields::{int_or, string_or};

pub const UNKNOWN_TEAM: &str = "Unknown Team";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRecord {
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamTotals {
    /// Wider than a score so summing parsed scores cannot overflow.
    pub total_points: i128,
    pub matches_played: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamAverage {
    pub team: String,
    pub avg_points: f64,
    pub total_points: i128,
    pub matches_played: u32,
}

// `null` and a missing key are both read as empty.
#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(default)]
    teams: Option<RawTeams>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTeams {
    #[serde(default)]
    team: Option<Vec<Value>>,
}

pub fn parse_match_records_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let rows: Vec<RawMatch> = parse_record_array(raw, "match")?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| build_match_record(row).with_context(|| format!("match #{idx}")))
        .collect()
}

fn build_match_record(row: RawMatch) -> Result<MatchRecord> {
    let entries = row.teams.unwrap_or_default().team.unwrap_or_default();
    let mut teams = Vec::with_capacity(entries.len());
    for entry in &entries {
        if !entry.is_object() {
            return Err(anyhow!("team entry is not an object: {entry}"));
        }
        teams.push(TeamEntry {
            name: string_or(entry, "name", UNKNOWN_TEAM),
            score: int_or(entry, "score", 0)?,
        });
    }
    Ok(MatchRecord { teams })
}

/// Running totals per team, in order of first appearance.
pub fn accumulate_team_totals(matches: &[MatchRecord]) -> Vec<(String, TeamTotals)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(String, TeamTotals)> = Vec::new();

    for m in matches {
        for entry in &m.teams {
            let slot = *index.entry(entry.name.as_str()).or_insert_with(|| {
                out.push((entry.name.clone(), TeamTotals::default()));
                out.len() - 1
            });
            let totals = &mut out[slot].1;
            totals.total_points += i128::from(entry.score);
            totals.matches_played += 1;
        }
    }

    out
}

/// Average points per match for every team that played, highest first.
/// Equal averages keep first-appearance order.
pub fn compute_team_averages(matches: &[MatchRecord]) -> Vec<TeamAverage> {
    let mut rows: Vec<TeamAverage> = accumulate_team_totals(matches)
        .into_iter()
        .filter(|(_, t)| t.matches_played > 0)
        .map(|(team, t)| TeamAverage {
            team,
            avg_points: t.total_points as f64 / t.matches_played as f64,
            total_points: t.total_points,
            matches_played: t.matches_played,
        })
        .collect();

    rows.sort_by(|a, b| b.avg_points.total_cmp(&a.avg_points));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_teams_block_is_an_empty_match() {
        let rows = parse_match_records_json(r#"[{}, {"teams": {}}]"#).unwrap();
        assert_eq!(rows, vec![MatchRecord::default(), MatchRecord::default()]);
    }

    #[test]
    fn null_teams_blocks_are_empty_matches() {
        let raw = r#"[{"teams": null}, {"teams": {"team": null}},
                      {"teams": {"team": [{"name": "A", "score": 3}]}}]"#;
        let rows = parse_match_records_json(raw).unwrap();
        assert!(rows[0].teams.is_empty());
        assert!(rows[1].teams.is_empty());
        assert_eq!(rows[2].teams, vec![TeamEntry { name: "A".to_string(), score: 3 }]);
    }

    #[test]
    fn wrong_shaped_teams_block_names_the_match() {
        let err = parse_match_records_json(r#"[{}, {"teams": {"team": "A"}}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("match #1"));
    }

    #[test]
    fn non_numeric_score_names_the_match() {
        let err = parse_match_records_json(r#"[{"teams":{"team":[{"name":"A","score":"x"}]}}]"#)
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("match #0"));
        assert!(msg.contains("score"));
    }

    #[test]
    fn totals_follow_first_appearance() {
        let matches = vec![
            MatchRecord {
                teams: vec![
                    TeamEntry { name: "B".to_string(), score: 10 },
                    TeamEntry { name: "A".to_string(), score: 5 },
                ],
            },
            MatchRecord {
                teams: vec![TeamEntry { name: "B".to_string(), score: 20 }],
            },
        ];
        let totals = accumulate_team_totals(&matches);
        assert_eq!(totals[0].0, "B");
        assert_eq!(totals[0].1, TeamTotals { total_points: 30, matches_played: 2 });
        assert_eq!(totals[1].0, "A");
        assert_eq!(totals[1].1, TeamTotals { total_points: 5, matches_played: 1 });
    }

    #[test]
    fn huge_scores_do_not_overflow() {
        let raw = r#"[{"teams":{"team":[{"name":"A","score":9223372036854775807}]}},
                      {"teams":{"team":[{"name":"A","score":"1"}]}}]"#;
        let teams = compute_team_averages(&parse_match_records_json(raw).unwrap());
        assert_eq!(teams[0].total_points, i128::from(i64::MAX) + 1);
        assert_eq!(teams[0].matches_played, 2);
        assert_eq!(teams[0].avg_points, (i64::MAX as f64 + 1.0) / 2.0);
    }
}
