use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::charts::{
    Figure, matches_played_trend_figure, player_insights_figure, raid_vs_tackle_figure,
    success_vs_points_figure, team_averages_figure,
};
use crate::config::AppConfig;
use crate::dataset::read_dataset;
use crate::insights::{PlayerInsight, compute_player_insights, mean_points_by_matches_played};
use crate::player_stats::{
    PlayerStatRow, flatten_player_stats, parse_player_records_json, players_without_bio,
};
use crate::team_stats::{TeamAverage, compute_team_averages, parse_match_records_json};

#[derive(Debug, Clone, PartialEq)]
pub struct TeamReport {
    pub matches: usize,
    pub teams: Vec<TeamAverage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReport {
    pub players: usize,
    pub players_without_bio: usize,
    pub rows: Vec<PlayerStatRow>,
    pub insights: Vec<PlayerInsight>,
    pub points_by_matches_played: Vec<(f64, f64)>,
}

pub fn analyze_matches(raw: &str) -> Result<TeamReport> {
    let matches = parse_match_records_json(raw)?;
    Ok(TeamReport {
        matches: matches.len(),
        teams: compute_team_averages(&matches),
    })
}

pub fn analyze_players(raw: &str) -> Result<PlayerReport> {
    let players = parse_player_records_json(raw)?;
    let rows = flatten_player_stats(&players);
    let insights = compute_player_insights(&rows)?;
    Ok(PlayerReport {
        players: players.len(),
        players_without_bio: players_without_bio(&players),
        points_by_matches_played: mean_points_by_matches_played(&rows),
        insights,
        rows,
    })
}

pub fn team_figures(report: &TeamReport) -> Vec<Figure> {
    vec![team_averages_figure(&report.teams)]
}

pub fn player_figures(report: &PlayerReport) -> Vec<Figure> {
    vec![
        player_insights_figure(&report.insights),
        raid_vs_tackle_figure(&report.rows),
        success_vs_points_figure(&report.rows),
        matches_played_trend_figure(&report.points_by_matches_played),
    ]
}

/// Team flow then player flow. `display` is called once per figure and must block
/// until the figure is dismissed; the player file is not read before the team chart
/// has been handed back.
pub fn run(
    config: &AppConfig,
    mut display: impl FnMut(&Figure) -> Result<()>,
) -> Result<(TeamReport, PlayerReport)> {
    let raw = read_dataset(&config.match_file)?;
    let team_report = analyze_matches(&raw)
        .with_context(|| format!("analyze {}", config.match_file.display()))?;
    log_team_report(&team_report);
    for figure in team_figures(&team_report) {
        show(&mut display, &figure)?;
    }

    let raw = read_dataset(&config.player_file)?;
    let player_report = analyze_players(&raw)
        .with_context(|| format!("analyze {}", config.player_file.display()))?;
    log_player_report(&player_report);
    for figure in player_figures(&player_report) {
        show(&mut display, &figure)?;
    }

    Ok((team_report, player_report))
}

fn show(display: &mut impl FnMut(&Figure) -> Result<()>, figure: &Figure) -> Result<()> {
    display(figure).with_context(|| format!("display chart \"{}\"", figure.title))
}

fn log_team_report(report: &TeamReport) {
    info!(matches = report.matches, teams = report.teams.len(), "team averages computed");
    for t in &report.teams {
        info!(
            team = %t.team,
            avg = format_args!("{:.2}", t.avg_points),
            matches = t.matches_played,
            "team average"
        );
    }
}

fn log_player_report(report: &PlayerReport) {
    if report.players_without_bio > 0 {
        warn!(count = report.players_without_bio, "players without bio skipped");
    }
    info!(players = report.players, rows = report.rows.len(), "player stats flattened");
    for insight in &report.insights {
        info!(
            category = insight.category.label(),
            player = %insight.player,
            value = format_args!("{:.2}", insight.value),
            "player insight"
        );
    }
}
