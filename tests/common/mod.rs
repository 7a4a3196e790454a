#![allow(dead_code)]

use async_trait::async_trait;
use cricket_analyst::llm::TextGenerator;
use cricket_analyst::{AnalystError, CricketData, Result};
use polars::prelude::*;
use std::sync::Mutex;

/// One delivery row: (match_id, batter, bowler, batsman_runs, is_wicket).
pub type Ball<'a> = (i64, &'a str, &'a str, i64, i64);

pub fn matches_frame(rows: &[(i64, &str)]) -> DataFrame {
    let ids: Vec<i64> = rows.iter().map(|r| r.0).collect();
    let seasons: Vec<&str> = rows.iter().map(|r| r.1).collect();
    df!("id" => ids, "season" => seasons).unwrap()
}

pub fn deliveries_frame(rows: &[Ball]) -> DataFrame {
    let match_ids: Vec<i64> = rows.iter().map(|r| r.0).collect();
    let batters: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let bowlers: Vec<&str> = rows.iter().map(|r| r.2).collect();
    let runs: Vec<i64> = rows.iter().map(|r| r.3).collect();
    let wickets: Vec<i64> = rows.iter().map(|r| r.4).collect();
    df!(
        "match_id" => match_ids,
        "batter" => batters,
        "bowler" => bowlers,
        "batsman_runs" => runs,
        "is_wicket" => wickets
    )
    .unwrap()
}

pub fn cricket_data(matches: &[(i64, &str)], balls: &[Ball]) -> CricketData {
    CricketData::from_frames(matches_frame(matches), deliveries_frame(balls)).unwrap()
}

/// Small season-spanning fixture used across tests.
///
/// Kohli: 2020 -> 30 runs (match 1), 2021 -> 50 runs (match 2), 4 balls.
/// Dhoni: 2021 -> 12 runs over 3 balls.
/// Bumrah takes two wickets, Chahal one; one non-wicket ball by Chahal.
pub fn sample_data() -> CricketData {
    cricket_data(
        &[(1, "2020"), (2, "2021")],
        &[
            (1, "V Kohli", "JJ Bumrah", 10, 0),
            (1, "V Kohli", "YS Chahal", 20, 0),
            (2, "V Kohli", "JJ Bumrah", 50, 0),
            (2, "V Kohli", "JJ Bumrah", 0, 1),
            (2, "MS Dhoni", "YS Chahal", 6, 0),
            (2, "MS Dhoni", "YS Chahal", 6, 0),
            (2, "MS Dhoni", "JJ Bumrah", 0, 1),
            (1, "RG Sharma", "YS Chahal", 0, 1),
        ],
    )
}

/// Returns a fixed answer and keeps every prompt it was given.
pub struct RecordingLlm {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(format!("  {}\n", self.reply))
    }
}

/// Fails every call with the error produced by `make`.
pub struct FailingLlm {
    pub make: fn() -> AnalystError,
}

#[async_trait]
impl TextGenerator for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err((self.make)())
    }
}
