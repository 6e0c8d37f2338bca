use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use yansi::Paint;

use super::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// A backend response with its HTTP status preserved; the creation endpoint
/// distinguishes 200/201 from 202.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-provided `message`, or a generic fallback built from the
    /// status code.
    pub fn message(&self) -> String {
        match self.body.get("message").and_then(|m| m.as_str()) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => format!("HTTP {}", self.status),
        }
    }

    /// Success body, or the server-reported error.
    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ApiError::Api {
                status: self.status,
                message: self.message(),
            })
        }
    }
}

/// Core HTTP client function for making API calls.
/// Builds the request, logs it curl-style, and keeps the response status.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    method: &str,
    endpoint: &str,
    body: Option<Value>,
    params: Option<Vec<(String, String)>>,
) -> Result<ApiResponse, ApiError> {
    log_request(api_base_url, api_token, method, endpoint, &body, &params);

    let url = format!("{}{}", api_base_url, endpoint);
    let mut req = match method {
        "GET" => client.get(&url),
        "POST" => client.post(&url),
        "PUT" => client.put(&url),
        "DELETE" => client.delete(&url),
        _ => client.get(&url),
    };

    if !api_token.is_empty() {
        req = req.header("Authorization", format!("Token {}", api_token));
    }

    if let Some(ref p) = params {
        req = req.query(p);
    }

    if let Some(ref b) = body {
        req = req.json(b);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status().as_u16();
    // Action and delete endpoints answer with empty bodies.
    let body = resp.json().await.unwrap_or(Value::Null);

    let json_str = serde_json::to_string(&body).unwrap_or_default();
    log_output(format!(
        "Response ({}):\n{}",
        status,
        Paint::new(json_str).rgb(100, 100, 100)
    ));
    tracing::debug!(status, endpoint, "API response");

    Ok(ApiResponse { status, body })
}

// Curl-style request log, silenceable for web-server use.
fn log_request(
    api_base_url: &str,
    api_token: &str,
    method: &str,
    endpoint: &str,
    body: &Option<Value>,
    params: &Option<Vec<(String, String)>>,
) {
    if SILENT.load(Ordering::Relaxed) {
        return;
    }
    let mut url_for_log = format!("{}{}", api_base_url, endpoint);
    if let Some(p) = params {
        if !p.is_empty() {
            let query_string = p
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<String>>()
                .join("&");
            url_for_log = format!("{}?{}", url_for_log, query_string);
        }
    }

    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
    if !api_token.is_empty() {
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Authorization: Token ...'").fg(yansi::Color::Magenta)
        ));
    }
    if let Some(b) = body {
        let json_str = serde_json::to_string_pretty(b).unwrap_or_default();
        let escaped = json_str.replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped)).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}
