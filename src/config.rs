//! Loading agent configuration (prompts, quiz tuning, extra topic hints) from TOML.
//!
//! See `AgentConfig` for the expected schema. Every section is optional.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub quiz: QuizSettings,
  #[serde(default)]
  pub topic_hints: Vec<TopicHintCfg>,
}

/// Extra curated context for a quiz topic. Overrides a built-in hint with the same topic.
#[derive(Clone, Debug, Deserialize)]
pub struct TopicHintCfg {
  pub topic: String,
  pub hint: String,
}

/// Prompt texts. Defaults target Vietnam's foreign relations; override in TOML to tune tone.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  /// Placeholders: {topic} {context} {language} {count} {options}
  pub quiz_template: String,
  pub quiz_language_vi: String,
  pub quiz_language_en: String,
  pub chat_system_vi: String,
  pub chat_system_en: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      quiz_template: r#"Tạo {count} câu hỏi trắc nghiệm (Multiple Choice) chất lượng cao để kiểm tra kiến thức về chủ đề: "{topic}" (trong bối cảnh quan hệ quốc tế, ngoại giao, kinh tế của Việt Nam).
{language}

Bối cảnh gợi ý: {context}

Yêu cầu quan trọng:
- Đúng {count} câu hỏi, KHÔNG trùng lặp về nội dung. Mỗi câu hỏi khai thác một khía cạnh riêng biệt.
- Mỗi câu hỏi có đúng {options} lựa chọn; "correctAnswerIndex" là số nguyên từ 0 đến 3.
- Độ khó: Trung bình - Khó (dành cho sinh viên/người nghiên cứu). Tránh câu hỏi hiển nhiên.
- "explanation" giải thích ngắn gọn vì sao đáp án đúng.

Định dạng đầu ra (bắt buộc):
- CHỈ trả về một mảng JSON hợp lệ, không có markdown, không có ``` và không có lời dẫn.
- Dấu ngoặc kép bên trong chuỗi phải được escape (\").
- Mỗi phần tử: {"question": string, "options": [string, string, string, string], "correctAnswerIndex": number, "explanation": string}"#
        .into(),
      quiz_language_vi: "Ngôn ngữ: Tiếng Việt.".into(),
      quiz_language_en: "Language: English.".into(),
      chat_system_vi: "Bạn là một chuyên gia AI cao cấp về quan hệ quốc tế, ngoại giao, kinh tế và lịch sử Việt Nam. Hãy cung cấp câu trả lời chi tiết, sâu sắc, có dẫn chứng số liệu và phân tích bối cảnh cụ thể. Bạn CHỈ trả lời các câu hỏi thuộc lĩnh vực này. Nếu câu hỏi không liên quan (giải toán, code, giải trí...), hãy lịch sự từ chối và hướng người dùng về chủ đề chính.".into(),
      chat_system_en: "You are a senior AI expert in Vietnam's international relations, diplomacy, economy, and history. Please provide detailed, profound answers with specific data and context analysis. You ONLY answer questions within this domain. If the question is unrelated (math, coding, entertainment...), politely refuse and guide the user back to the main topic.".into(),
    }
  }
}

/// Quiz pipeline tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
  pub target_questions: usize,
  /// Below this many valid questions an attempt counts as insufficient.
  pub min_questions: usize,
  pub max_attempts: u32,
  pub retry_delay_ms: u64,
}

impl Default for QuizSettings {
  fn default() -> Self {
    Self { target_questions: 10, min_questions: 5, max_attempts: 2, retry_delay_ms: 1000 }
  }
}

impl QuizSettings {
  pub fn retry_delay(&self) -> Duration {
    Duration::from_millis(self.retry_delay_ms)
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "vn_diplomacy_backend", %path, hints = cfg.topic_hints.len(), "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "vn_diplomacy_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "vn_diplomacy_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
