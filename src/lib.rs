pub mod analyst;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod facts;
pub mod llm;
pub mod router;

pub use analyst::{Analyst, AskResponse, Comparison, PlayerInsight};
pub use data::CricketData;
pub use error::{AnalystError, Result};
