//! Chart payloads
//!
//! Charts are plain data: the HTTP server returns them as JSON for a
//! front-end to draw, and the CLI renders them as text bars.

use crate::data::{RankedEntry, SeasonRuns};
use serde::{Deserialize, Serialize};

pub const RUNS_COLOR: &str = "#4988C4";
pub const WICKETS_COLOR: &str = "#1C4D8D";
pub const TREND_COLOR: &str = "#4988C4";
pub const COMPARE_COLOR: &str = "#0F2854";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: String,
    pub height: u32,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    fn ranking(title: &str, x_label: &str, y_label: &str, color: &str, entries: &[RankedEntry]) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            color: color.to_string(),
            height: 650,
            points: entries
                .iter()
                .map(|e| ChartPoint {
                    label: e.name.clone(),
                    value: e.value as f64,
                })
                .collect(),
        }
    }

    pub fn top_run_scorers(entries: &[RankedEntry]) -> Self {
        Self::ranking("Top Run Scorers", "Batter", "Runs", RUNS_COLOR, entries)
    }

    pub fn top_wicket_takers(entries: &[RankedEntry]) -> Self {
        Self::ranking("Top Wicket Takers", "Bowler", "Wickets", WICKETS_COLOR, entries)
    }

    pub fn season_trend(player: &str, trend: &[SeasonRuns]) -> Self {
        Self {
            kind: ChartKind::Line,
            title: format!("{} - Runs by Season", player),
            x_label: "Season".to_string(),
            y_label: "Runs".to_string(),
            color: TREND_COLOR.to_string(),
            height: 550,
            points: trend
                .iter()
                .map(|s| ChartPoint {
                    label: s.season.clone(),
                    value: s.runs as f64,
                })
                .collect(),
        }
    }

    pub fn head_to_head(a: &str, runs_a: i64, b: &str, runs_b: i64) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: format!("{} vs {}", a, b),
            x_label: "Player".to_string(),
            y_label: "Runs".to_string(),
            color: COMPARE_COLOR.to_string(),
            height: 550,
            points: vec![
                ChartPoint { label: a.to_string(), value: runs_a as f64 },
                ChartPoint { label: b.to_string(), value: runs_b as f64 },
            ],
        }
    }

    /// Horizontal bar rendering for terminals, bars scaled to `width` cells.
    pub fn render_text(&self, width: usize) -> String {
        let mut out = format!("{}\n", self.title);
        if self.points.is_empty() {
            out.push_str("  (no data)\n");
            return out;
        }

        let label_width = self.points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
        let max = self.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

        for point in &self.points {
            let cells = if max > 0.0 {
                ((point.value / max) * width as f64).round() as usize
            } else {
                0
            };
            out.push_str(&format!(
                "  {:<label_width$} | {} {}\n",
                point.label,
                "#".repeat(cells),
                point.value,
                label_width = label_width
            ));
        }
        out
    }
}
