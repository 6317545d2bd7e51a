//! Single-turn Q&A scoped to Vietnam's foreign relations.
//!
//! Always answers with text: provider problems become a localized apology.

use tracing::{debug, error, instrument, warn};

use crate::config::Prompts;
use crate::domain::Language;
use crate::providers::SharedGenerator;

#[derive(Clone)]
pub struct ChatResponder {
  generator: Option<SharedGenerator>,
  prompts: Prompts,
}

impl ChatResponder {
  pub fn new(generator: Option<SharedGenerator>, prompts: Prompts) -> Self {
    Self { generator, prompts }
  }

  fn prompt(&self, message: &str, lang: Language) -> String {
    let system = lang.pick(&self.prompts.chat_system_vi, &self.prompts.chat_system_en);
    format!("{}\n\nUser: {}\nAI:", system, message.trim())
  }

  #[instrument(level = "info", skip(self, message), fields(%lang, message_len = message.len()))]
  pub async fn chat(&self, message: &str, lang: Language) -> String {
    let Some(generator) = &self.generator else {
      warn!(target: "chat", "No provider configured");
      return lang
        .pick("Vui lòng cấu hình API Key để sử dụng tính năng này.", "Please configure the API Key to use this feature.")
        .into();
    };
    if message.trim().is_empty() {
      return String::new();
    }

    match generator.generate_text(&self.prompt(message, lang)).await {
      Ok(text) if !text.trim().is_empty() => {
        debug!(target: "chat", provider = generator.name(), reply_len = text.len(), "Chat reply");
        text.trim().to_string()
      }
      Ok(_) => lang
        .pick("Xin lỗi, tôi không thể trả lời ngay lúc này.", "Sorry, I cannot answer right now.")
        .into(),
      Err(e) => {
        error!(target: "chat", provider = generator.name(), error = %e, "Chat provider call failed");
        lang.pick("Đã xảy ra lỗi khi kết nối với AI.", "An error occurred while connecting to AI.").into()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::providers::testing::ScriptedGenerator;
  use crate::providers::ProviderError;

  #[tokio::test]
  async fn reply_is_trimmed_and_prompt_is_scoped() {
    let stub = Arc::new(ScriptedGenerator::texts(["  Vietnam joined ASEAN in 1995.\n"]));
    let chat = ChatResponder::new(Some(stub.clone()), Prompts::default());

    let reply = chat.chat("When did Vietnam join ASEAN?", Language::En).await;
    assert_eq!(reply, "Vietnam joined ASEAN in 1995.");

    let prompt = stub.last_prompt().unwrap();
    assert!(prompt.starts_with("You are a senior AI expert"));
    assert!(prompt.ends_with("User: When did Vietnam join ASEAN?\nAI:"));
  }

  #[tokio::test]
  async fn provider_failure_becomes_localized_apology() {
    let stub = Arc::new(ScriptedGenerator::new(vec![Err(ProviderError::EmptyContent("scripted"))]));
    let chat = ChatResponder::new(Some(stub), Prompts::default());
    assert_eq!(chat.chat("Xin chào", Language::Vi).await, "Đã xảy ra lỗi khi kết nối với AI.");
  }

  #[tokio::test]
  async fn blank_reply_gets_fallback_text() {
    let stub = Arc::new(ScriptedGenerator::texts(["   "]));
    let chat = ChatResponder::new(Some(stub), Prompts::default());
    assert_eq!(chat.chat("Hi", Language::En).await, "Sorry, I cannot answer right now.");
  }

  #[tokio::test]
  async fn unconfigured_and_blank_input() {
    let chat = ChatResponder::new(None, Prompts::default());
    assert_eq!(chat.chat("Hi", Language::En).await, "Please configure the API Key to use this feature.");

    let stub = Arc::new(ScriptedGenerator::texts(["unused"]));
    let chat = ChatResponder::new(Some(stub.clone()), Prompts::default());
    assert_eq!(chat.chat("   ", Language::En).await, "");
    assert_eq!(stub.calls(), 0);
  }
}
