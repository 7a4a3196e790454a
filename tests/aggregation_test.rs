mod common;

use common::{cricket_data, sample_data, Ball};
use cricket_analyst::data::{PlayerStats, RankedEntry, SeasonRuns, TOP_N};

fn entry(name: &str, value: i64) -> RankedEntry {
    RankedEntry { name: name.to_string(), value }
}

#[test]
fn test_top_run_scorers_sums_by_batter() {
    let data = cricket_data(
        &[(1, "2020")],
        &[(1, "A", "X", 4, 0), (1, "A", "X", 6, 0), (1, "B", "X", 1, 0)],
    );
    assert_eq!(data.top_run_scorers().unwrap(), vec![entry("A", 10), entry("B", 1)]);
}

#[test]
fn test_top_run_scorers_capped_and_sorted() {
    let names: Vec<String> = (0..14).map(|i| format!("Batter {:02}", i)).collect();
    let balls: Vec<Ball> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (1, name.as_str(), "X", (i as i64 % 5) + 1, 0))
        .collect();
    let total: i64 = balls.iter().map(|b| b.3).sum();
    let data = cricket_data(&[(1, "2020")], &balls);

    let top = data.top_run_scorers().unwrap();
    assert_eq!(top.len(), TOP_N);
    assert!(top.windows(2).all(|w| w[0].value >= w[1].value));
    assert!(top.iter().map(|e| e.value).sum::<i64>() <= total);

    // Equal totals are ordered by name
    assert_eq!(top[0], entry("Batter 04", 5));
    assert_eq!(top[1], entry("Batter 09", 5));
}

#[test]
fn test_top_wicket_takers_counts_only_wickets() {
    let data = sample_data();
    assert_eq!(
        data.top_wicket_takers().unwrap(),
        vec![entry("JJ Bumrah", 2), entry("YS Chahal", 1)]
    );

    let no_wickets = cricket_data(&[(1, "2020")], &[(1, "A", "X", 4, 0), (1, "A", "Y", 0, 0)]);
    assert!(no_wickets.top_wicket_takers().unwrap().is_empty());
}

#[test]
fn test_player_stats() {
    let data = sample_data();
    let stats = data.player_stats("V Kohli").unwrap();
    assert_eq!(stats.runs, 80);
    assert_eq!(stats.balls, 4);
    assert_eq!(stats.strike_rate, 2000.0);
    assert_eq!(stats.matches_played, 2);
    assert_eq!(stats.best_season.as_deref(), Some("2021"));

    let dhoni = data.player_stats("MS Dhoni").unwrap();
    assert_eq!(dhoni.runs, 12);
    assert_eq!(dhoni.balls, 3);
    assert_eq!(dhoni.strike_rate, 400.0);
    assert_eq!(dhoni.matches_played, 1);
}

#[test]
fn test_strike_rate_zero_when_no_runs() {
    let data = sample_data();
    let stats = data.player_stats("RG Sharma").unwrap();
    assert_eq!(stats.runs, 0);
    assert_eq!(stats.balls, 1);
    assert_eq!(stats.strike_rate, 0.0);
}

#[test]
fn test_unknown_player_gets_empty_stats() {
    let data = sample_data();
    assert!(!data.has_player("Nobody"));
    assert_eq!(data.player_stats("Nobody").unwrap(), PlayerStats::empty());
    assert_eq!(data.player_stats("Nobody").unwrap().strike_rate, 0.0);
    assert!(data.player_trend("Nobody").unwrap().is_empty());
}

#[test]
fn test_player_trend_ordered_by_season() {
    let data = sample_data();
    assert_eq!(
        data.player_trend("V Kohli").unwrap(),
        vec![
            SeasonRuns { season: "2020".to_string(), runs: 30 },
            SeasonRuns { season: "2021".to_string(), runs: 50 },
        ]
    );
}

#[test]
fn test_player_trend_sorts_out_of_order_input() {
    let data = cricket_data(
        &[(1, "2022"), (2, "2019"), (3, "2020")],
        &[(1, "A", "X", 7, 0), (2, "A", "X", 3, 0), (3, "A", "X", 5, 0)],
    );
    let seasons: Vec<String> = data
        .player_trend("A")
        .unwrap()
        .into_iter()
        .map(|s| s.season)
        .collect();
    assert_eq!(seasons, vec!["2019", "2020", "2022"]);
}

#[test]
fn test_unmatched_match_id_has_no_season() {
    // Match 99 is not in the match table
    let data = cricket_data(
        &[(1, "2020")],
        &[(1, "A", "X", 4, 0), (99, "A", "X", 100, 0), (99, "B", "X", 6, 0)],
    );

    let a = data.player_stats("A").unwrap();
    assert_eq!(a.runs, 104);
    assert_eq!(a.matches_played, 2);
    assert_eq!(a.best_season.as_deref(), Some("2020"));
    assert_eq!(
        data.player_trend("A").unwrap(),
        vec![SeasonRuns { season: "2020".to_string(), runs: 4 }]
    );

    // Only season-less deliveries: no best season instead of a failure
    let b = data.player_stats("B").unwrap();
    assert_eq!(b.runs, 6);
    assert_eq!(b.best_season, None);
    assert!(data.player_trend("B").unwrap().is_empty());
}

#[test]
fn test_players_sorted_and_distinct() {
    let data = sample_data();
    assert_eq!(data.players(), ["MS Dhoni", "RG Sharma", "V Kohli"]);
    assert!(data.has_player("MS Dhoni"));
    assert!(!data.has_player("ms dhoni"));
}

#[test]
fn test_empty_tables() {
    let data = cricket_data(&[], &[]);
    assert!(data.players().is_empty());
    assert!(data.top_run_scorers().unwrap().is_empty());
    assert!(data.top_wicket_takers().unwrap().is_empty());
}
