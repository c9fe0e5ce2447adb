use std::fs;
use std::path::PathBuf;

use pkl_stats::insights::{
    InsightCategory, compute_player_insights, mean_points_by_matches_played,
};
use pkl_stats::player_stats::{flatten_player_stats, parse_player_records_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_player_scenario() {
    let raw = r#"[{"bio":{"full_name":"X"},"over_all_stats":[{"match_played":5,
        "raid_points_per_match":8,"success_raid_percent":60,"point":100,"career_best_points":20}]}]"#;
    let players = parse_player_records_json(raw).expect("scenario should parse");
    let rows = flatten_player_stats(&players);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tackle_points, 0.0);

    let insights = compute_player_insights(&rows).expect("one row is enough");
    let got: Vec<(InsightCategory, &str, f64)> = insights
        .iter()
        .map(|i| (i.category, i.player.as_str(), i.value))
        .collect();
    assert_eq!(
        got,
        vec![
            (InsightCategory::MostConsistent, "X", 8.0),
            (InsightCategory::MostExplosive, "X", 60.0),
            (InsightCategory::BestOverall, "X", 100.0),
            (InsightCategory::HighestIndividualPerformance, "X", 20.0),
        ]
    );
}

#[test]
fn zero_match_period_yields_no_rows() {
    let raw = r#"[{"bio":{"full_name":"Bench"},"over_all_stats":[{"match_played":0,"point":50}]}]"#;
    let rows = flatten_player_stats(&parse_player_records_json(raw).unwrap());
    assert!(rows.is_empty());
    assert!(compute_player_insights(&rows).is_err());
}

#[test]
fn missing_bio_contributes_nothing() {
    let raw = r#"[{"over_all_stats":[{"match_played":9,"point":500}]}]"#;
    let players = parse_player_records_json(raw).expect("missing bio is not an error");
    assert_eq!(players.len(), 1);
    assert!(flatten_player_stats(&players).is_empty());
}

#[test]
fn fixture_rows_only_for_played_periods() {
    let players = parse_player_records_json(&read_fixture("stats_player.json")).unwrap();
    assert_eq!(players.len(), 4);
    let rows = flatten_player_stats(&players);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.matches_played > 0.0));

    let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(
        names,
        vec!["Pardeep Narwal", "Pardeep Narwal", "Fazel Atrachali", "Maninder Singh"]
    );
    // Numeric strings are accepted.
    assert_eq!(rows[3].matches_played, 22.0);
    assert_eq!(rows[3].total_points, 209.0);
}

#[test]
fn fixture_insights() {
    let players = parse_player_records_json(&read_fixture("stats_player.json")).unwrap();
    let rows = flatten_player_stats(&players);
    let insights = compute_player_insights(&rows).unwrap();
    assert_eq!(insights.len(), 4);

    assert_eq!(insights[0].player, "Pardeep Narwal");
    assert!(approx(insights[0].value, (10.82 + 12.0) / 2.0));

    assert_eq!(insights[1].player, "Maninder Singh");
    assert!(approx(insights[1].value, 66.0));

    assert_eq!(insights[2].player, "Pardeep Narwal");
    assert!(approx(insights[2].value, 545.0));

    // The bio-less 99 is excluded.
    assert_eq!(insights[3].player, "Pardeep Narwal");
    assert!(approx(insights[3].value, 34.0));
}

#[test]
fn trend_groups_by_matches_played() {
    let players = parse_player_records_json(&read_fixture("stats_player.json")).unwrap();
    let series = mean_points_by_matches_played(&flatten_player_stats(&players));
    assert_eq!(series, vec![(22.0, 226.0), (24.0, 193.5)]);
}

#[test]
fn repeated_runs_are_identical() {
    let raw = read_fixture("stats_player.json");
    let run = || {
        let rows = flatten_player_stats(&parse_player_records_json(&raw).unwrap());
        compute_player_insights(&rows).unwrap()
    };
    assert_eq!(run(), run());
}
