//! In-memory cricket tables
//!
//! `CricketData` is built once at startup and never mutated afterwards.
//! Every aggregation borrows it, so it can be shared behind an `Arc`
//! between concurrent requests without locking.

pub mod loader;
pub mod stats;

use crate::config::DataPaths;
use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::info;

pub use stats::{PlayerStats, RankedEntry, SeasonRuns, TOP_N};

/// Column names of the source tables.
pub mod columns {
    pub const ID: &str = "id";
    pub const SEASON: &str = "season";
    pub const MATCH_ID: &str = "match_id";
    pub const BATTER: &str = "batter";
    pub const BOWLER: &str = "bowler";
    pub const BATSMAN_RUNS: &str = "batsman_runs";
    pub const IS_WICKET: &str = "is_wicket";
}

/// Read-only context holding the season-enriched delivery table.
#[derive(Debug, Clone)]
pub struct CricketData {
    deliveries: DataFrame,
    players: Vec<String>,
}

impl CricketData {
    /// Load both tables from disk and join them.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        info!(
            "Loading matches from {:?} and deliveries from {:?}",
            paths.matches, paths.deliveries
        );
        let matches = loader::scan_table(&paths.matches)?;
        let deliveries = loader::scan_table(&paths.deliveries)?;
        Self::from_joined(loader::join_seasons(matches, deliveries)?)
    }

    /// Build from frames already in memory (fixtures, other loaders).
    pub fn from_frames(matches: DataFrame, deliveries: DataFrame) -> Result<Self> {
        Self::from_joined(loader::join_seasons(matches.lazy(), deliveries.lazy())?)
    }

    fn from_joined(deliveries: DataFrame) -> Result<Self> {
        let players: BTreeSet<String> = deliveries
            .column(columns::BATTER)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        info!("Loaded {} deliveries, {} distinct batters", deliveries.height(), players.len());

        Ok(Self {
            deliveries,
            players: players.into_iter().collect(),
        })
    }

    /// Distinct non-null batter names, ascending.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players
            .binary_search_by(|p| p.as_str().cmp(name))
            .is_ok()
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.height()
    }

    pub(crate) fn deliveries(&self) -> LazyFrame {
        self.deliveries.clone().lazy()
    }
}
