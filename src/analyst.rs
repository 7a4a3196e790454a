//! Analyst service
//!
//! The boundary every front-end talks to. It routes questions, runs the
//! aggregations, asks the model for a grounded answer, and turns model
//! failures into a message for the user instead of an error.

use crate::chart::Chart;
use crate::data::{CricketData, PlayerStats};
use crate::error::{AnalystError, Result};
use crate::facts;
use crate::llm::{self, TextGenerator};
use crate::router::{self, Intent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Answer to a free-text question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub chart: Option<Chart>,
    /// The question echoed back for matched intents, empty otherwise.
    pub question: String,
    pub intent: Intent,
}

/// Player panel contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInsight {
    pub player: String,
    pub card: String,
    pub stats: PlayerStats,
    pub chart: Chart,
}

/// Head-to-head comparison of two batters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub answer: String,
    pub chart: Chart,
    pub player_a: String,
    pub stats_a: PlayerStats,
    pub player_b: String,
    pub stats_b: PlayerStats,
}

/// Text shown in place of an answer when the model call fails.
pub fn unavailable_message(err: &AnalystError) -> String {
    match err {
        AnalystError::Timeout(_) => {
            "The analysis service took too long to respond. Please try again.".to_string()
        }
        AnalystError::RateLimited(_) => {
            "The analysis service is busy right now. Please try again shortly.".to_string()
        }
        AnalystError::Auth(_) => {
            "The analysis service rejected the configured credentials.".to_string()
        }
        other => format!("Unable to generate an answer right now: {}", other),
    }
}

/// Player panel built straight from the tables.
pub fn player_insight(data: &CricketData, player: &str) -> Result<PlayerInsight> {
    let stats = data.player_stats(player)?;
    let trend = data.player_trend(player)?;
    Ok(PlayerInsight {
        player: player.to_string(),
        card: facts::player_card(player, &stats),
        chart: Chart::season_trend(player, &trend),
        stats,
    })
}

pub struct Analyst {
    data: Arc<CricketData>,
    llm: Arc<dyn TextGenerator>,
}

impl Analyst {
    pub fn new(data: Arc<CricketData>, llm: Arc<dyn TextGenerator>) -> Self {
        Self { data, llm }
    }

    pub fn data(&self) -> &CricketData {
        &self.data
    }

    pub fn players(&self) -> &[String] {
        self.data.players()
    }

    /// Answer a free-text question. Never fails: aggregation and model
    /// errors come back as the answer text with no chart.
    pub async fn ask(&self, question: &str) -> AskResponse {
        let intent = router::route(question);
        info!("Routed question to {:?}", intent);

        match self.answer_intent(intent, question).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Ask failed: {}", err);
                AskResponse {
                    answer: unavailable_message(&err),
                    chart: None,
                    question: String::new(),
                    intent,
                }
            }
        }
    }

    async fn answer_intent(&self, intent: Intent, question: &str) -> Result<AskResponse> {
        match self.leader_facts(intent)? {
            Some((facts, chart)) => {
                let answer = llm::answer(self.llm.as_ref(), &facts, question).await?;
                Ok(AskResponse {
                    answer,
                    chart: Some(chart),
                    question: question.to_string(),
                    intent,
                })
            }
            None => {
                let answer = llm::answer(self.llm.as_ref(), facts::NO_FACT_MATCHED, question).await?;
                Ok(AskResponse {
                    answer,
                    chart: None,
                    question: String::new(),
                    intent: Intent::Fallback,
                })
            }
        }
    }

    /// Leader fact and top-10 chart for a ranking intent. `None` for the
    /// fallback intent or when the ranking is empty.
    fn leader_facts(&self, intent: Intent) -> Result<Option<(String, Chart)>> {
        let (entries, chart) = match intent {
            Intent::RunScorers => {
                let entries = self.data.top_run_scorers()?;
                let chart = Chart::top_run_scorers(&entries);
                (entries, chart)
            }
            Intent::WicketTakers => {
                let entries = self.data.top_wicket_takers()?;
                let chart = Chart::top_wicket_takers(&entries);
                (entries, chart)
            }
            Intent::Fallback => return Ok(None),
        };

        let Some(leader) = entries.first() else {
            warn!("No ranking rows for {:?}, answering without facts", intent);
            return Ok(None);
        };

        let fact = match intent {
            Intent::WicketTakers => facts::top_wicket_taker_fact(&leader.name, leader.value),
            _ => facts::top_scorer_fact(&leader.name, leader.value),
        };
        Ok(Some((fact, chart)))
    }

    /// Summary card and season trend for one batter. No model call.
    pub fn player_insight(&self, player: &str) -> Result<PlayerInsight> {
        player_insight(&self.data, player)
    }

    /// Compare two batters. A failed remote model call only replaces the
    /// answer text; stats and chart are still returned. Local failures
    /// propagate.
    pub async fn compare(&self, player_a: &str, player_b: &str) -> Result<Comparison> {
        let stats_a = self.data.player_stats(player_a)?;
        let stats_b = self.data.player_stats(player_b)?;

        let facts = facts::comparison_facts(player_a, &stats_a, player_b, &stats_b);
        let question = facts::comparison_question(player_a, player_b);

        let answer = match llm::answer(self.llm.as_ref(), &facts, &question).await {
            Ok(answer) => answer,
            Err(err) if err.is_remote() => {
                warn!("Comparison answer failed: {}", err);
                unavailable_message(&err)
            }
            Err(err) => return Err(err),
        };

        Ok(Comparison {
            answer,
            chart: Chart::head_to_head(player_a, stats_a.runs, player_b, stats_b.runs),
            player_a: player_a.to_string(),
            stats_a,
            player_b: player_b.to_string(),
            stats_b,
        })
    }
}
