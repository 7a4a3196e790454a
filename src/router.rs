//! Question routing
//!
//! A question is matched against an ordered rule list and the first rule
//! with a keyword contained in the lower-cased question wins. Order
//! matters: "runs" is checked before "wickets", so a question mentioning
//! both goes to the run-scorer answer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    RunScorers,
    WicketTakers,
    Fallback,
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl IntentRule {
    /// `lowered` must already be lower-case.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Evaluated top to bottom.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::RunScorers,
        keywords: &["run", "runs", "run scorer"],
    },
    IntentRule {
        intent: Intent::WicketTakers,
        keywords: &["wicket", "wickets", "wicket taker"],
    },
];

pub fn route(question: &str) -> Intent {
    route_with(INTENT_RULES, question)
}

pub fn route_with(rules: &[IntentRule], question: &str) -> Intent {
    let lowered = question.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_questions() {
        assert_eq!(route("Who is the top run scorer in IPL?"), Intent::RunScorers);
        assert_eq!(route("MOST RUNS EVER"), Intent::RunScorers);
    }

    #[test]
    fn test_wicket_questions() {
        assert_eq!(route("Who has taken the most Wickets?"), Intent::WicketTakers);
        assert_eq!(route("best wicket taker"), Intent::WicketTakers);
    }

    #[test]
    fn test_runs_win_over_wickets() {
        assert_eq!(route("runs or wickets, who leads?"), Intent::RunScorers);
        assert_eq!(route("wickets and runs"), Intent::RunScorers);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(route("Which team won in 2016?"), Intent::Fallback);
        assert_eq!(route(""), Intent::Fallback);
    }

    #[test]
    fn test_substring_matching() {
        // "running" contains "run"; matching is by substring, not word.
        assert_eq!(route("Who is running the show?"), Intent::RunScorers);
    }

    #[test]
    fn test_custom_rule_order() {
        let reversed = [INTENT_RULES[1], INTENT_RULES[0]];
        assert_eq!(route_with(&reversed, "runs and wickets"), Intent::WicketTakers);
    }
}
