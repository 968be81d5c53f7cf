//! Minimal chat-completion client for an OpenAI-compatible endpoint (Groq by default).
//!
//! One call per operation: system + user message at a given temperature, plain
//! text back. Calls log model name, latency and token usage (not contents).
//! The API key is never logged.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::ModelSettings;
use crate::error::QuizError;

#[derive(Clone)]
pub struct ChatClient {
  client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
}

impl ChatClient {
  pub fn new(settings: &ModelSettings) -> Result<Self, QuizError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(settings.timeout_secs))
      .build()
      .map_err(|e| QuizError::Transport(format!("failed to build HTTP client: {e}")))?;

    Ok(Self {
      client,
      api_key: settings.api_key.clone(),
      base_url: settings.base_url.trim_end_matches('/').to_string(),
      model: settings.model.clone(),
    })
  }

  /// Send one chat completion and return `choices[0].message.content` untouched.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model, user_len = user.len()))]
  pub async fn chat(&self, system: &str, user: &str, temperature: f32) -> Result<String, QuizError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: &self.model,
      messages: [
        ChatMessageReq { role: "system", content: system },
        ChatMessageReq { role: "user", content: user },
      ],
      temperature,
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "mcq-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await
      .map_err(|e| QuizError::Transport(format!("request failed: {e}")))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      return Err(QuizError::Transport(format!("HTTP {}: {}", status, msg)));
    }

    let body: ChatCompletionResponse = res.json().await
      .map_err(|e| QuizError::Transport(format!("malformed completion response: {e}")))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "Model usage");
    }

    let text = body.choices.into_iter().next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| QuizError::Transport("completion response carried no message content".into()))?;

    info!(elapsed = ?start.elapsed(), reply_len = text.len(), "Model reply received");
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: [ChatMessageReq<'a>; 2],
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq<'a> { role: &'static str, content: &'a str }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Pull `error.message` out of an OpenAI-style error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
