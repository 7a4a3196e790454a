use crate::config::LlmConfig;
use crate::error::{AnalystError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const TEMPERATURE: f64 = 0.1;
pub const MAX_TOKENS: u32 = 180;

/// Anything that turns a prompt into text. The analyst only talks to the
/// model through this, so tests can swap in a canned implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Prompt that keeps the model on the supplied facts.
pub fn build_prompt(facts: &str, question: &str) -> String {
    format!(
        r#"
You are an IPL (Indian Premier League) cricket analyst.

RULES:
- Talk ONLY about IPL.
- Use ONLY the facts provided.
- Do NOT mention datasets, calculations, or models.
- 2-3 crisp professional sentences.
- Sound like Cricinfo / IPL broadcast analysis.

FACTS:
{}

QUESTION:
{}

FINAL IPL ANALYSIS:
"#,
        facts, question
    )
}

/// Ask `generator` a question grounded in `facts`.
pub async fn answer(generator: &dyn TextGenerator, facts: &str, question: &str) -> Result<String> {
    let prompt = build_prompt(facts, question);
    let text = generator.generate(&prompt).await?;
    Ok(text.trim().to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
///
/// Each call is a single attempt bounded by the configured timeout.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalystError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_llm(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        info!("Calling LLM model {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("LLM call failed with status {}", status);
            return Err(classify_status(status.as_u16(), &detail));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        let content = extract_content(&response_json)?;
        debug!("LLM returned {} chars", content.len());
        Ok(content)
    }

    fn transport_error(&self, err: reqwest::Error) -> AnalystError {
        if err.is_timeout() {
            AnalystError::Timeout(self.timeout.as_secs())
        } else if err.is_decode() {
            AnalystError::MalformedResponse(err.to_string())
        } else {
            AnalystError::Llm(format!("LLM API call failed: {}", err))
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call_llm(prompt).await
    }
}

/// Map a non-success HTTP status to an error kind.
pub fn classify_status(status: u16, detail: &str) -> AnalystError {
    let detail = if detail.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, detail.trim())
    };
    match status {
        401 | 403 => AnalystError::Auth(detail),
        429 => AnalystError::RateLimited(detail),
        _ => AnalystError::Llm(detail),
    }
}

/// Pull the first choice's message content out of a completion payload.
pub fn extract_content(response: &serde_json::Value) -> Result<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| AnalystError::MalformedResponse("No content in LLM response".to_string()))
}
