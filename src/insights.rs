use std::collections::BTreeMap;

use anyhow::{Result, anyhow};

use crate::player_stats::PlayerStatRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightCategory {
    MostConsistent,
    MostExplosive,
    BestOverall,
    HighestIndividualPerformance,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 4] = [
        InsightCategory::MostConsistent,
        InsightCategory::MostExplosive,
        InsightCategory::BestOverall,
        InsightCategory::HighestIndividualPerformance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InsightCategory::MostConsistent => "Most Consistent Player",
            InsightCategory::MostExplosive => "Most Explosive Player",
            InsightCategory::BestOverall => "Best Overall Player",
            InsightCategory::HighestIndividualPerformance => "Highest Individual Performance",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInsight {
    pub category: InsightCategory,
    pub player: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct PlayerTotals {
    rows: usize,
    raid_points_per_match: f64,
    success_raid_percent: f64,
    total_points: f64,
}

fn group_by_player(rows: &[PlayerStatRow]) -> BTreeMap<&str, PlayerTotals> {
    let mut out: BTreeMap<&str, PlayerTotals> = BTreeMap::new();
    for row in rows {
        let t = out.entry(row.player.as_str()).or_default();
        t.rows += 1;
        t.raid_points_per_match += row.raid_points_per_match;
        t.success_raid_percent += row.success_raid_percent;
        t.total_points += row.total_points;
    }
    out
}

/// Highest value wins; among equal values the first visited (smallest name) stays.
fn argmax<'a>(values: impl Iterator<Item = (&'a str, f64)>) -> Option<(&'a str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (name, v) in values {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((name, v)),
        }
    }
    best
}

/// The four superlatives, in `InsightCategory::ALL` order.
pub fn compute_player_insights(rows: &[PlayerStatRow]) -> Result<Vec<PlayerInsight>> {
    if rows.is_empty() {
        return Err(anyhow!("no player stat rows to compute insights from"));
    }
    let groups = group_by_player(rows);

    let mean = |f: fn(&PlayerTotals) -> f64| {
        argmax(groups.iter().map(|(name, t)| (*name, f(t) / t.rows as f64)))
    };
    let most_consistent = mean(|t| t.raid_points_per_match);
    let most_explosive = mean(|t| t.success_raid_percent);
    let best_overall = argmax(groups.iter().map(|(name, t)| (*name, t.total_points)));
    let highest_single = argmax(rows.iter().map(|r| (r.player.as_str(), r.career_best_points)));

    let picks = [most_consistent, most_explosive, best_overall, highest_single];
    InsightCategory::ALL
        .iter()
        .zip(picks)
        .map(|(category, pick)| {
            let (player, value) =
                pick.ok_or_else(|| anyhow!("no candidate for {}", category.label()))?;
            Ok(PlayerInsight {
                category: *category,
                player: player.to_string(),
                value,
            })
        })
        .collect()
}

/// Mean total points per distinct matches-played value, ascending by matches played.
pub fn mean_points_by_matches_played(rows: &[PlayerStatRow]) -> Vec<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (r.matches_played, r.total_points))
        .collect();
    // Stable, so points within a bucket are summed in row order.
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out: Vec<(f64, f64)> = Vec::new();
    let mut i = 0usize;
    while i < pairs.len() {
        let key = pairs[i].0;
        let mut sum = 0.0;
        let mut n = 0usize;
        while i < pairs.len() && pairs[i].0 == key {
            sum += pairs[i].1;
            n += 1;
            i += 1;
        }
        out.push((key, sum / n as f64));
    }
    out
}
