//! Table loading
//!
//! Reads the match and delivery tables (CSV, or Parquet by extension) and
//! left-joins the match season onto every delivery.

use crate::data::columns::*;
use crate::error::{AnalystError, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Open a table lazily. `.parquet` files are scanned as Parquet, anything
/// else is read as CSV with a header row.
pub fn scan_table(path: &Path) -> Result<LazyFrame> {
    if !path.exists() {
        return Err(AnalystError::DataLoad(format!(
            "Table file not found: {}",
            path.display()
        )));
    }

    let is_parquet = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("parquet"))
        .unwrap_or(false);

    if is_parquet {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .map_err(|e| AnalystError::DataLoad(format!("Failed to load Parquet {}: {}", path.display(), e)))
    } else {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()
            .map_err(|e| AnalystError::DataLoad(format!("Failed to load CSV {}: {}", path.display(), e)))
    }
}

/// Normalize column types and attach `season` to each delivery.
///
/// Deliveries whose `match_id` has no match row keep a null season.
pub fn join_seasons(matches: LazyFrame, deliveries: LazyFrame) -> Result<DataFrame> {
    let seasons = matches.select([
        col(ID).cast(DataType::Int64),
        col(SEASON).cast(DataType::String),
    ]);

    let deliveries = deliveries.select([
        col(MATCH_ID).cast(DataType::Int64),
        col(BATTER).cast(DataType::String),
        col(BOWLER).cast(DataType::String),
        col(BATSMAN_RUNS).cast(DataType::Int64),
        col(IS_WICKET).cast(DataType::Int64),
    ]);

    let joined = deliveries
        .join(
            seasons,
            [col(MATCH_ID)],
            [col(ID)],
            JoinArgs::new(JoinType::Left),
        )
        .select([
            col(MATCH_ID),
            col(BATTER),
            col(BOWLER),
            col(BATSMAN_RUNS),
            col(IS_WICKET),
            col(SEASON),
        ])
        .collect()
        .map_err(|e| AnalystError::DataLoad(format!("Failed to join deliveries with matches: {}", e)))?;

    info!("Joined {} deliveries with match seasons", joined.height());
    Ok(joined)
}
