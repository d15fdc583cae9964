use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Sampling and transport limits applied to a single completion call.
#[derive(Clone, Debug)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f64,
}

// Only the fields we consume. Anything else the endpoint sends back
// is ignored.
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

// Object {
//     "error": Object {
//         "message": String("Invalid model"),
//         "type": String("invalid_request_error"),
//         "code": Null
//     }
// }
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request timed out")]
    Timeout,

    #[error("rate limited by endpoint")]
    RateLimited,

    #[error("endpoint error ({status}): {detail}")]
    Endpoint { status: u16, detail: String },

    #[error("{0}")]
    Unexpected(String),
}

impl CompletionError {
    /// Failures that are likely to go away if the user simply tries
    /// again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::RateLimited)
    }

    fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Self::RateLimited;
        }
        let detail = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.trim().to_string()
                }
            });
        Self::Endpoint {
            status: status.as_u16(),
            detail,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// Sends a single chat completion request to an OpenAI compatible
/// API and returns the text of the first choice verbatim. Never
/// retries.
pub async fn completion(
    messages: &[Message],
    options: &CompletionOptions,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, CompletionError> {
    let payload = CompletionRequest {
        model,
        messages,
        max_tokens: options.max_tokens,
        temperature: options.temperature,
    };
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(options.timeout)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(CompletionError::from_status(status, &text));
    }

    let resp: CompletionResponse = serde_json::from_str(&text).map_err(|e| {
        tracing::debug!("Unparseable completion response: {}", text);
        CompletionError::Unexpected(format!("invalid completion response: {}", e))
    })?;

    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::Unexpected("no message received".to_string()))
}
