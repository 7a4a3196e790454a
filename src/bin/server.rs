//! HTTP server for the dashboard UI
//! Simple JSON API over tokio, one task per connection

use cricket_analyst::analyst::Analyst;
use cricket_analyst::chart::Chart;
use cricket_analyst::config::{server_addr_from_env, DataPaths, LlmConfig};
use cricket_analyst::data::CricketData;
use cricket_analyst::llm::LlmClient;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const MAX_REQUEST_BYTES: usize = 1_000_000;

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Deserialize)]
struct PlayerRequest {
    player: String,
}

#[derive(Deserialize)]
struct CompareRequest {
    player_a: String,
    player_b: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Fail fast on missing credentials or data before accepting connections
    let config = LlmConfig::from_env()?;
    let llm = LlmClient::new(&config)?;
    let data = CricketData::load(&DataPaths::from_env())?;
    info!("Loaded {} deliveries, {} players", data.delivery_count(), data.players().len());

    let analyst = Arc::new(Analyst::new(Arc::new(data), Arc::new(llm)));

    let addr = server_addr_from_env();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("New connection from: {}", peer);
        tokio::spawn(handle_connection(stream, Arc::clone(&analyst)));
    }
}

async fn handle_connection(mut stream: TcpStream, analyst: Arc<Analyst>) {
    use tokio::time::{timeout, Duration};

    // Read request with timeout to prevent hanging
    let mut buffer = Vec::new();
    let mut temp_buf = [0; 8192];

    let read_result = timeout(Duration::from_secs(5), async {
        loop {
            match stream.read(&mut temp_buf).await {
                Ok(0) => break,
                Ok(n) => {
                    buffer.extend_from_slice(&temp_buf[..n]);
                    if request_complete(&buffer) || buffer.len() > MAX_REQUEST_BYTES {
                        break;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    })
    .await;

    match read_result {
        Err(_) => {
            warn!("Request read timeout");
            return;
        }
        Ok(Err(e)) => {
            warn!("Failed to read from stream: {}", e);
            return;
        }
        Ok(Ok(())) => {}
    }

    if buffer.is_empty() {
        return;
    }

    let response = match String::from_utf8(buffer) {
        Ok(request) => handle_request(&request, &analyst).await,
        Err(_) => create_response(400, "Bad Request", r#"{"error":"request is not valid UTF-8"}"#),
    };

    if let Err(e) = stream.write_all(response.as_bytes()).await {
        warn!("Failed to write response: {}", e);
    }
}

/// Headers received and, when a Content-Length is given, the whole body.
fn request_complete(buffer: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(buffer) else {
        return false;
    };
    let Some(headers_end) = text.find("\r\n\r\n") else {
        return false;
    };
    match extract_content_length(text) {
        Some(length) => buffer.len() >= headers_end + 4 + length,
        None => true,
    }
}

fn extract_content_length(request: &str) -> Option<usize> {
    for line in request.lines() {
        if line.is_empty() {
            break;
        }
        if line.to_lowercase().starts_with("content-length:") {
            if let Some(value) = line.split(':').nth(1) {
                return value.trim().parse().ok();
            }
        }
    }
    None
}

fn request_body(request: &str) -> &str {
    request
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or("")
}

async fn handle_request(request: &str, analyst: &Analyst) -> String {
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let (Some(method), Some(full_path)) = (parts.next(), parts.next()) else {
        return create_response(400, "Bad Request", "{}");
    };

    let path_str = full_path.split('?').next().unwrap_or("/");
    let mut path = path_str.trim_end_matches('/');
    if path.is_empty() {
        path = "/";
    }

    debug!("Request: {} {}", method, path);

    let result = match (method, path) {
        ("OPTIONS", _) => return create_response(204, "No Content", ""),
        ("GET", "/api/health") => {
            return create_response(200, "OK", r#"{"status":"ok","service":"cricket-analyst"}"#)
        }
        ("GET", "/api/players") => handle_players(analyst),
        ("GET", "/api/top/runs") => handle_top_runs(analyst),
        ("GET", "/api/top/wickets") => handle_top_wickets(analyst),
        ("POST", "/api/ask") => handle_ask(request_body(request), analyst).await,
        ("POST", "/api/player") => handle_player(request_body(request), analyst),
        ("POST", "/api/compare") => handle_compare(request_body(request), analyst).await,
        _ => return create_response(404, "Not Found", r#"{"error":"not found"}"#),
    };

    match result {
        Ok(json) => create_response(200, "OK", &json),
        Err(HandlerError::BadRequest(msg)) => {
            create_response(400, "Bad Request", &json!({ "error": msg }).to_string())
        }
        Err(HandlerError::Internal(msg)) => {
            error!("Request {} {} failed: {}", method, path, msg);
            create_response(500, "Internal Server Error", &json!({ "error": msg }).to_string())
        }
    }
}

enum HandlerError {
    BadRequest(String),
    Internal(String),
}

impl From<cricket_analyst::AnalystError> for HandlerError {
    fn from(err: cricket_analyst::AnalystError) -> Self {
        HandlerError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Internal(err.to_string())
    }
}

fn parse_body<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, HandlerError> {
    serde_json::from_str(body).map_err(|e| HandlerError::BadRequest(format!("Invalid request body: {}", e)))
}

fn handle_players(analyst: &Analyst) -> Result<String, HandlerError> {
    Ok(json!({ "players": analyst.players() }).to_string())
}

fn handle_top_runs(analyst: &Analyst) -> Result<String, HandlerError> {
    let entries = analyst.data().top_run_scorers()?;
    let chart = Chart::top_run_scorers(&entries);
    Ok(serde_json::to_string(&json!({ "entries": entries, "chart": chart }))?)
}

fn handle_top_wickets(analyst: &Analyst) -> Result<String, HandlerError> {
    let entries = analyst.data().top_wicket_takers()?;
    let chart = Chart::top_wicket_takers(&entries);
    Ok(serde_json::to_string(&json!({ "entries": entries, "chart": chart }))?)
}

async fn handle_ask(body: &str, analyst: &Analyst) -> Result<String, HandlerError> {
    let req: AskRequest = parse_body(body)?;
    let response = analyst.ask(&req.question).await;
    Ok(serde_json::to_string(&response)?)
}

fn handle_player(body: &str, analyst: &Analyst) -> Result<String, HandlerError> {
    let req: PlayerRequest = parse_body(body)?;
    let insight = analyst.player_insight(&req.player)?;
    Ok(serde_json::to_string(&insight)?)
}

async fn handle_compare(body: &str, analyst: &Analyst) -> Result<String, HandlerError> {
    let req: CompareRequest = parse_body(body)?;
    let comparison = analyst.compare(&req.player_a, &req.player_b).await?;
    Ok(serde_json::to_string(&comparison)?)
}

fn create_response(status: u16, status_text: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Content-Length: {}\r\n\
         \r\n\
         {}",
        status,
        status_text,
        body.len(),
        body
    )
}
