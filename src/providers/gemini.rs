//! Gemini client (generateContent). The "structured" provider.
//!
//! Supports `responseSchema`, so quiz requests ask for an array of question
//! objects directly. Output is still parsed defensively by the caller.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{http_client, http_failure, ProviderError, TextGenerator};

const NAME: &str = "gemini";

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());
    Some(Self { client: http_client()?, api_key, base_url, model })
  }

  async fn generate(&self, prompt: &str, schema: Option<&serde_json::Value>) -> Result<String, ProviderError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let start = std::time::Instant::now();

    let res = self.client.post(&url)
      .query(&[("key", self.api_key.as_str())])
      .header(USER_AGENT, super::USER_AGENT)
      .header(CONTENT_TYPE, "application/json")
      .json(&request_body(prompt, schema))
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(http_failure(NAME, status, body, start.elapsed()));
    }

    let body: GenerateContentResponse = res.json().await?;
    let text = candidate_text(body)?;
    info!(target: "vn_diplomacy_backend", elapsed = ?start.elapsed(), response_len = text.len(), structured = schema.is_some(), "Gemini response received");
    Ok(text)
  }
}

#[async_trait]
impl TextGenerator for Gemini {
  fn name(&self) -> &'static str {
    NAME
  }

  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
    self.generate(prompt, None).await
  }

  #[instrument(level = "info", skip(self, prompt, schema), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn generate_structured(&self, prompt: &str, schema: &serde_json::Value) -> Result<String, ProviderError> {
    self.generate(prompt, Some(schema)).await
  }
}

fn request_body(prompt: &str, schema: Option<&serde_json::Value>) -> GenerateContentRequest {
  GenerateContentRequest {
    contents: vec![Content { parts: vec![Part { text: prompt.into() }] }],
    generation_config: schema.map(|s| GenerationConfig {
      response_mime_type: "application/json".into(),
      response_schema: s.clone(),
    }),
  }
}

/// Concatenate the text parts of the first candidate.
fn candidate_text(body: GenerateContentResponse) -> Result<String, ProviderError> {
  let candidate = body.candidates.into_iter().next().ok_or(ProviderError::Decode {
    provider: NAME,
    message: "no candidates in response".into(),
  })?;
  let text: String = candidate
    .content
    .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
    .unwrap_or_default();
  if text.trim().is_empty() {
    return Err(ProviderError::EmptyContent(NAME));
  }
  Ok(text)
}

// --- generateContent DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
  contents: Vec<Content>,
  #[serde(skip_serializing_if = "Option::is_none")]
  generation_config: Option<GenerationConfig>,
}
#[derive(Serialize)]
struct Content { parts: Vec<Part> }
#[derive(Serialize)]
struct Part { text: String }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  response_mime_type: String,
  response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<Candidate>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<CandidateContent> }
#[derive(Deserialize)]
struct CandidateContent { #[serde(default)] parts: Vec<CandidatePart> }
#[derive(Deserialize)]
struct CandidatePart { #[serde(default)] text: Option<String> }
