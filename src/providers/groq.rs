//! Groq client (OpenAI-compatible chat.completions). The "fast" provider.
//!
//! One non-streaming request per call, fixed temperature and a bounded output
//! budget. We never log the API key or the prompt, only sizes and latency.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{http_client, http_failure, ProviderError, TextGenerator};

const NAME: &str = "groq";
const TEMPERATURE: f32 = 0.4;
const MAX_TOKENS: u32 = 1200;

#[derive(Clone)]
pub struct Groq {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Groq {
  /// Construct the client if we find GROQ_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url =
      std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| "https://api.groq.com/openai/v1".into());
    let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| "llama-3.3-70b-versatile".into());
    Some(Self { client: http_client()?, api_key, base_url, model })
  }

  fn request_body(&self, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
      model: self.model.clone(),
      temperature: TEMPERATURE,
      max_tokens: MAX_TOKENS,
      messages: vec![ChatMessageReq { role: "user".into(), content: prompt.into() }],
    }
  }
}

#[async_trait]
impl TextGenerator for Groq {
  fn name(&self) -> &'static str {
    NAME
  }

  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
    let url = format!("{}/chat/completions", self.base_url);
    let start = std::time::Instant::now();

    let res = self.client.post(&url)
      .header(USER_AGENT, super::USER_AGENT)
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&self.request_body(prompt))
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(http_failure(NAME, status, body, start.elapsed()));
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      debug!(target: "vn_diplomacy_backend", prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "Groq usage");
    }
    let text = first_choice_text(body)?;
    info!(target: "vn_diplomacy_backend", elapsed = ?start.elapsed(), response_len = text.len(), "Groq response received");
    Ok(text)
  }
}

fn first_choice_text(body: ChatCompletionResponse) -> Result<String, ProviderError> {
  body.choices
    .into_iter()
    .next()
    .and_then(|c| c.message.content)
    .filter(|t| !t.trim().is_empty())
    .ok_or(ProviderError::EmptyContent(NAME))
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  temperature: f32,
  max_tokens: u32,
  messages: Vec<ChatMessageReq>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)] choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { #[serde(default)] content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}
