//! Aggregations over the delivery table
//!
//! Grouping runs in Polars; ranking happens in Rust after collect so the
//! tie-break is explicit: value descending, then name ascending.

use super::columns::*;
use super::CricketData;
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rankings are cut at this many entries.
pub const TOP_N: usize = 10;

/// One row of a ranking: a player and the aggregated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub value: i64,
}

/// Runs a player scored in one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRuns {
    pub season: String,
    pub runs: i64,
}

/// Batting summary for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub runs: i64,
    pub balls: i64,
    /// Runs per 100 balls, rounded to 2 decimals. 0 when no balls were faced.
    pub strike_rate: f64,
    pub matches_played: i64,
    /// Season with the most runs. `None` when the player has no delivery
    /// with a known season.
    pub best_season: Option<String>,
}

impl PlayerStats {
    /// Stats for a player with no deliveries at all.
    pub fn empty() -> Self {
        Self {
            runs: 0,
            balls: 0,
            strike_rate: 0.0,
            matches_played: 0,
            best_season: None,
        }
    }
}

pub fn strike_rate(runs: i64, balls: i64) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    let raw = runs as f64 / balls as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Highest-run season; on equal runs the earliest season wins.
pub fn best_season(trend: &[SeasonRuns]) -> Option<String> {
    let mut best: Option<&SeasonRuns> = None;
    for entry in trend {
        match best {
            Some(current) if entry.runs < current.runs => {}
            Some(current) if entry.runs == current.runs && entry.season >= current.season => {}
            _ => best = Some(entry),
        }
    }
    best.map(|b| b.season.clone())
}

/// Sort descending by value, ascending by name, and keep the first `TOP_N`.
pub fn rank(mut entries: Vec<RankedEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(TOP_N);
    entries
}

/// Read a (string key, i64 value) pair of columns, skipping null keys.
fn keyed_values(df: &DataFrame, key: &str, value: &str) -> Result<Vec<(String, i64)>> {
    let keys = df.column(key)?.str()?;
    let values = df.column(value)?.i64()?;
    Ok(keys
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(k, v)| k.map(|k| (k.to_string(), v.unwrap_or(0))))
        .collect())
}

fn scalar_i64(df: &DataFrame, name: &str) -> Result<i64> {
    Ok(df.column(name)?.i64()?.get(0).unwrap_or(0))
}

impl CricketData {
    /// Ten highest run scorers.
    pub fn top_run_scorers(&self) -> Result<Vec<RankedEntry>> {
        let grouped = self
            .deliveries()
            .group_by([col(BATTER)])
            .agg([col(BATSMAN_RUNS).sum().cast(DataType::Int64).alias("runs")])
            .collect()?;

        let entries = keyed_values(&grouped, BATTER, "runs")?
            .into_iter()
            .map(|(name, value)| RankedEntry { name, value })
            .collect();
        Ok(rank(entries))
    }

    /// Ten bowlers with the most wicket deliveries.
    pub fn top_wicket_takers(&self) -> Result<Vec<RankedEntry>> {
        let grouped = self
            .deliveries()
            .filter(col(IS_WICKET).eq(lit(1i64)))
            .group_by([col(BOWLER)])
            .agg([len().cast(DataType::Int64).alias("wickets")])
            .collect()?;

        let entries = keyed_values(&grouped, BOWLER, "wickets")?
            .into_iter()
            .map(|(name, value)| RankedEntry { name, value })
            .collect();
        Ok(rank(entries))
    }

    /// Batting summary for `player`. Unknown names get `PlayerStats::empty()`.
    pub fn player_stats(&self, player: &str) -> Result<PlayerStats> {
        if !self.has_player(player) {
            debug!("Unknown player '{}', returning empty stats", player);
            return Ok(PlayerStats::empty());
        }

        let summary = self
            .deliveries()
            .filter(col(BATTER).eq(lit(player)))
            .select([
                col(BATSMAN_RUNS).sum().cast(DataType::Int64).alias("runs"),
                len().cast(DataType::Int64).alias("balls"),
                col(MATCH_ID).n_unique().cast(DataType::Int64).alias("matches"),
            ])
            .collect()?;

        let runs = scalar_i64(&summary, "runs")?;
        let balls = scalar_i64(&summary, "balls")?;
        let trend = self.player_trend(player)?;

        Ok(PlayerStats {
            runs,
            balls,
            strike_rate: strike_rate(runs, balls),
            matches_played: scalar_i64(&summary, "matches")?,
            best_season: best_season(&trend),
        })
    }

    /// Runs per season for `player`, ascending by season. Deliveries without
    /// a season are left out.
    pub fn player_trend(&self, player: &str) -> Result<Vec<SeasonRuns>> {
        if !self.has_player(player) {
            return Ok(Vec::new());
        }

        let grouped = self
            .deliveries()
            .filter(col(BATTER).eq(lit(player)).and(col(SEASON).is_not_null()))
            .group_by([col(SEASON)])
            .agg([col(BATSMAN_RUNS).sum().cast(DataType::Int64).alias("runs")])
            .collect()?;

        let mut trend: Vec<SeasonRuns> = keyed_values(&grouped, SEASON, "runs")?
            .into_iter()
            .map(|(season, runs)| SeasonRuns { season, runs })
            .collect();
        trend.sort_by(|a, b| a.season.cmp(&b.season));
        Ok(trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: i64) -> RankedEntry {
        RankedEntry { name: name.to_string(), value }
    }

    fn season(season: &str, runs: i64) -> SeasonRuns {
        SeasonRuns { season: season.to_string(), runs }
    }

    #[test]
    fn test_strike_rate_rounding_and_zero_balls() {
        assert_eq!(strike_rate(0, 0), 0.0);
        assert_eq!(strike_rate(10, 0), 0.0);
        assert_eq!(strike_rate(10, 3), 333.33);
        assert_eq!(strike_rate(53, 40), 132.5);
    }

    #[test]
    fn test_rank_breaks_ties_by_name() {
        let ranked = rank(vec![entry("Zed", 5), entry("Amy", 5), entry("Bob", 9)]);
        assert_eq!(ranked, vec![entry("Bob", 9), entry("Amy", 5), entry("Zed", 5)]);
    }

    #[test]
    fn test_rank_truncates_to_top_n() {
        let entries = (0..15).map(|i| entry(&format!("p{:02}", i), i)).collect();
        let ranked = rank(entries);
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0], entry("p14", 14));
        assert_eq!(ranked[TOP_N - 1], entry("p05", 5));
    }

    #[test]
    fn test_best_season_prefers_earliest_on_tie() {
        let trend = vec![season("2019", 40), season("2020", 70), season("2021", 70)];
        assert_eq!(best_season(&trend), Some("2020".to_string()));
    }

    #[test]
    fn test_best_season_empty() {
        assert_eq!(best_season(&[]), None);
    }
}
