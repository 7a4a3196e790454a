use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalystError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data load error: {0}")]
    DataLoad(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM request timed out after {0}s")]
    Timeout(u64),

    #[error("LLM authentication failed: {0}")]
    Auth(String),

    #[error("LLM rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("Polars error: {0}")]
    Polars(String),
}

impl AnalystError {
    /// True for failures of the remote language-model call. `compare`
    /// renders these inline; anything else fails the request.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AnalystError::Llm(_)
                | AnalystError::Timeout(_)
                | AnalystError::Auth(_)
                | AnalystError::RateLimited(_)
                | AnalystError::MalformedResponse(_)
        )
    }
}

impl From<polars::error::PolarsError> for AnalystError {
    fn from(err: polars::error::PolarsError) -> Self {
        AnalystError::Polars(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalystError>;
