//! Text-generation backends behind a single trait.
//!
//! Two interchangeable providers exist: Groq (fast, OpenAI-compatible chat
//! completions) and Gemini (supports a response schema). Which one is used is
//! decided once at startup: a Groq key wins, otherwise Gemini, otherwise none.
//!
//! Providers do not retry. Callers own retry policy.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

pub mod gemini;
pub mod groq;

pub use gemini::Gemini;
pub use groq::Groq;

pub(crate) const USER_AGENT: &str = "vn-diplomacy-backend/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ProviderError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("{provider} HTTP {status}: {body}")]
  Http { provider: &'static str, status: u16, body: String },
  #[error("{0} returned empty content")]
  EmptyContent(&'static str),
  #[error("could not decode {provider} response: {message}")]
  Decode { provider: &'static str, message: String },
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
  /// Short provider name for logs and health output.
  fn name(&self) -> &'static str;

  /// Send one prompt, get the raw model text back.
  async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;

  /// Same as `generate_text`, but lets providers that support it constrain the
  /// output to `schema`. The result is still untrusted text.
  async fn generate_structured(&self, prompt: &str, _schema: &serde_json::Value) -> Result<String, ProviderError> {
    self.generate_text(prompt).await
  }
}

pub type SharedGenerator = Arc<dyn TextGenerator>;

/// Shared reqwest client with an explicit timeout.
pub(crate) fn http_client() -> Option<reqwest::Client> {
  let secs = std::env::var("PROVIDER_TIMEOUT_SECS")
    .ok()
    .and_then(|s| s.parse::<u64>().ok())
    .unwrap_or(DEFAULT_TIMEOUT_SECS);
  match reqwest::Client::builder().timeout(Duration::from_secs(secs)).build() {
    Ok(client) => Some(client),
    Err(e) => {
      error!(target: "vn_diplomacy_backend", error = %e, "Failed to build HTTP client; provider disabled");
      None
    }
  }
}

/// Error for a non-2xx reply. The raw body is kept; a parsed message is only logged.
pub(crate) fn http_failure(provider: &'static str, status: u16, body: String, elapsed: Duration) -> ProviderError {
  let message = extract_error_message(&body);
  error!(
    target: "vn_diplomacy_backend",
    provider,
    status,
    ?elapsed,
    message = message.as_deref().unwrap_or("<unparsed>"),
    "Provider call failed"
  );
  ProviderError::Http { provider, status, body }
}

/// Pick the provider for the process lifetime from environment credentials.
///
/// A non-blank `GROQ_API_KEY` selects Groq exclusively; Gemini is only
/// consulted when that key is absent or blank.
pub fn select_from_env() -> Option<SharedGenerator> {
  if has_key("GROQ_API_KEY") {
    let groq = Groq::from_env()?;
    info!(target: "vn_diplomacy_backend", base_url = %groq.base_url, model = %groq.model, "Groq enabled (fast provider).");
    return Some(Arc::new(groq));
  }
  if let Some(gemini) = Gemini::from_env() {
    info!(target: "vn_diplomacy_backend", base_url = %gemini.base_url, model = %gemini.model, "Gemini enabled (structured provider).");
    return Some(Arc::new(gemini));
  }
  None
}

fn has_key(var: &str) -> bool {
  std::env::var(var).map(|k| !k.trim().is_empty()).unwrap_or(false)
}

/// Pull a readable message out of an OpenAI- or Google-style error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
  #[derive(serde::Deserialize)]
  struct EWrap { error: EObj }
  #[derive(serde::Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}


/// Scripted provider for tests: replays canned responses and counts calls.
#[cfg(test)]
pub mod testing {
  use std::collections::VecDeque;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  use async_trait::async_trait;

  use super::{ProviderError, TextGenerator};

  pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
  }

  impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
      Self { responses: Mutex::new(responses.into()), calls: AtomicUsize::new(0), prompts: Mutex::new(vec![]) }
    }

    pub fn texts<I: IntoIterator<Item = S>, S: Into<String>>(texts: I) -> Self {
      Self::new(texts.into_iter().map(|t| Ok(t.into())).collect())
    }

    pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
      self.prompts.lock().unwrap().last().cloned()
    }
  }

  #[async_trait]
  impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
      "scripted"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.prompts.lock().unwrap().push(prompt.to_string());
      // An exhausted script behaves like a provider that keeps failing.
      self.responses.lock().unwrap().pop_front().unwrap_or(Err(ProviderError::EmptyContent("scripted")))
    }
  }

  /// A well-formed JSON array of `n` four-option questions.
  pub fn valid_quiz_json(n: usize) -> String {
    let items: Vec<serde_json::Value> = (0..n)
      .map(|i| {
        serde_json::json!({
          "question": format!("Question {i}?"),
          "options": ["A", "B", "C", "D"],
          "correctAnswerIndex": i % 4,
          "explanation": format!("Explanation {i}")
        })
      })
      .collect();
    serde_json::Value::Array(items).to_string()
  }
}
