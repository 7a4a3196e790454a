//! Grounding facts
//!
//! Turns aggregation results into the short sentences handed to the
//! language model, and the markdown card shown for a single player.

use crate::data::PlayerStats;

pub const NO_FACT_MATCHED: &str =
    "This question relates to IPL cricket but no numerical fact was matched.";

/// Placeholder shown when a player has no season to report.
pub const UNKNOWN_SEASON: &str = "N/A";

pub fn top_scorer_fact(name: &str, runs: i64) -> String {
    format!("In the IPL, {} is the highest run scorer with {} runs.", name, runs)
}

pub fn top_wicket_taker_fact(name: &str, wickets: i64) -> String {
    format!(
        "In the IPL, {} is the leading wicket taker with {} wickets.",
        name, wickets
    )
}

pub fn comparison_facts(a: &str, stats_a: &PlayerStats, b: &str, stats_b: &PlayerStats) -> String {
    format!(
        "In the IPL:\n{}\n{}",
        comparison_line(a, stats_a),
        comparison_line(b, stats_b)
    )
}

fn comparison_line(name: &str, stats: &PlayerStats) -> String {
    format!(
        "{}: {} runs, strike rate {}, {} matches",
        name,
        stats.runs,
        strike_rate_label(stats),
        stats.matches_played
    )
}

pub fn comparison_question(a: &str, b: &str) -> String {
    format!("Compare {} vs {}", a, b)
}

/// Strike rate as the dashboard prints it: a bare `0` when no balls were
/// faced, otherwise always with a decimal part (`2000.0`, `132.5`).
pub fn strike_rate_label(stats: &PlayerStats) -> String {
    if stats.balls == 0 {
        "0".to_string()
    } else {
        format!("{:?}", stats.strike_rate)
    }
}

pub fn season_label(stats: &PlayerStats) -> &str {
    stats.best_season.as_deref().unwrap_or(UNKNOWN_SEASON)
}

/// Markdown summary card for the player panel.
pub fn player_card(name: &str, stats: &PlayerStats) -> String {
    format!(
        "### {}\n**Runs:** {}  \n**Strike Rate:** {}  \n**Matches:** {}  \n**Best Season:** {}\n",
        name,
        stats.runs,
        strike_rate_label(stats),
        stats.matches_played,
        season_label(stats)
    )
}
