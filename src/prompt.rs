//! Quiz prompt construction: curated topic hints plus the output contract.

use serde_json::{json, Value};

use crate::config::{Prompts, TopicHintCfg};
use crate::content::region_aliases;
use crate::domain::{Language, RegionId};
use crate::util::fill_template;

const OPTIONS_PER_QUESTION: usize = 4;

const GENERIC_HINT: &str = "Khai thác đa dạng khía cạnh của \"{topic}\": lịch sử thiết lập quan hệ, các hiệp định và cơ chế hợp tác (FTA, đối tác chiến lược), số liệu thương mại và đầu tư, sự kiện ngoại giao gần đây, và ý nghĩa chiến lược đối với Việt Nam.";

fn builtin_hint(id: RegionId) -> &'static str {
  match id {
    RegionId::Un => "Gia nhập LHQ ngày 20/9/1977 (thành viên thứ 149); hai nhiệm kỳ Ủy viên không thường trực HĐBA (2008-2009, 2020-2021); lực lượng gìn giữ hòa bình tại Nam Sudan và Cộng hòa Trung Phi; Ngày Quốc tế phòng chống dịch bệnh 27/12; Hội đồng Nhân quyền 2023-2025; MDGs và SDGs.",
    RegionId::Eu => "Quan hệ ngoại giao với EC từ năm 1990; Hiệp định PCA (2012); EVFTA và EVIPA ký năm 2019, EVFTA có hiệu lực 1/8/2020; thị trường 450 triệu dân; vai trò cầu nối ASEAN - EU.",
    RegionId::Africa => "Tình hữu nghị từ thời kỳ đấu tranh giải phóng dân tộc; quan hệ ngoại giao với 54/55 nước; hợp tác Nam - Nam và hợp tác ba bên với FAO; đầu tư viễn thông của Viettel (Mozambique, Tanzania, Burundi); Quan sát viên Liên minh Châu Phi (2023).",
    RegionId::Asean => "Gia nhập ASEAN ngày 28/7/1995 tại Brunei; Hội nghị Cấp cao lần thứ 6 tại Hà Nội (1998); Chủ tịch ASEAN 2010 và 2020; Cộng đồng Kinh tế ASEAN (2015); Tầm nhìn ASEAN 2025; Biển Đông và UNCLOS 1982.",
    RegionId::Apec => "Thành viên APEC từ năm 1998; đăng cai Năm APEC 2006 (Hà Nội) và 2017 (Đà Nẵng); Tầm nhìn APEC sau 2020; tỷ trọng thương mại, FDI và du khách từ các nền kinh tế APEC; nâng cấp quan hệ song phương bên lề APEC 2023.",
    RegionId::HcmIdeology => "Tư tưởng Hồ Chí Minh về đối ngoại: độc lập, tự chủ gắn với đoàn kết quốc tế; \"thêm bạn, bớt thù\"; \"dĩ bất biến, ứng vạn biến\"; kết hợp sức mạnh dân tộc với sức mạnh thời đại; vận dụng trong đường lối đa phương hóa, đa dạng hóa hiện nay.",
  }
}

/// Curated context for `topic`. Configured hints win over built-in ones;
/// built-in ones match any localized region name or id, ignoring case.
pub fn topic_hint(topic: &str, extra: &[TopicHintCfg]) -> String {
  let wanted = topic.trim().to_lowercase();

  if let Some(h) = extra.iter().find(|h| h.topic.trim().to_lowercase() == wanted) {
    return h.hint.clone();
  }

  let ids = [RegionId::HcmIdeology].into_iter().chain(RegionId::MAP);
  for id in ids {
    if region_aliases(id).iter().any(|alias| alias.to_lowercase() == wanted) {
      return builtin_hint(id).to_string();
    }
  }

  fill_template(GENERIC_HINT, &[("topic", topic.trim())])
}

/// The full quiz instruction sent to the provider.
pub fn build_quiz_prompt(
  prompts: &Prompts,
  hints: &[TopicHintCfg],
  topic: &str,
  lang: Language,
  count: usize,
) -> String {
  let context = topic_hint(topic, hints);
  let language = lang.pick(&prompts.quiz_language_vi, &prompts.quiz_language_en);
  let count = count.to_string();
  let options = OPTIONS_PER_QUESTION.to_string();
  fill_template(
    &prompts.quiz_template,
    &[
      ("topic", topic.trim()),
      ("context", &context),
      ("language", language),
      ("count", &count),
      ("options", &options),
    ],
  )
}

/// Response schema for providers that support constrained output.
pub fn quiz_schema() -> Value {
  json!({
    "type": "ARRAY",
    "items": {
      "type": "OBJECT",
      "properties": {
        "question": { "type": "STRING" },
        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
        "correctAnswerIndex": { "type": "INTEGER", "description": "Index of the correct answer (0-3)" },
        "explanation": { "type": "STRING", "description": "Explanation of why the answer is correct" }
      },
      "required": ["question", "options", "correctAnswerIndex", "explanation"]
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hints_match_localized_names_and_ids() {
    assert!(topic_hint("ASEAN", &[]).contains("28/7/1995"));
    assert!(topic_hint("asean", &[]).contains("28/7/1995"));
    assert!(topic_hint("United Nations (UN)", &[]).contains("1977"));
    assert!(topic_hint("Liên Hợp Quốc (UN)", &[]).contains("1977"));
    assert!(topic_hint("Applying Ho Chi Minh's Ideology", &[]).contains("thêm bạn"));
    assert!(topic_hint("Châu Phi", &[]).contains("FAO"));
  }

  #[test]
  fn unknown_topic_uses_generic_template() {
    let hint = topic_hint("  Mekong  ", &[]);
    assert!(hint.contains("\"Mekong\""));
    assert!(hint.contains("ý nghĩa chiến lược"));
  }

  #[test]
  fn configured_hint_overrides_builtin() {
    let extra = vec![TopicHintCfg { topic: "ASEAN".into(), hint: "custom".into() }];
    assert_eq!(topic_hint("asean", &extra), "custom");
  }

  #[test]
  fn prompt_embeds_topic_language_and_contract() {
    let p = build_quiz_prompt(&Prompts::default(), &[], "ASEAN", Language::En, 10);
    assert!(p.contains("\"ASEAN\""));
    assert!(p.contains("Language: English."));
    assert!(p.contains("Tạo 10 câu hỏi"));
    assert!(p.contains("đúng 4 lựa chọn"));
    assert!(p.contains("từ 0 đến 3"));
    assert!(p.contains("CHỈ trả về một mảng JSON"));
    assert!(p.contains("28/7/1995"));
    assert!(!p.contains("{topic}") && !p.contains("{context}") && !p.contains("{count}"));

    let vi = build_quiz_prompt(&Prompts::default(), &[], "ASEAN", Language::Vi, 10);
    assert!(vi.contains("Ngôn ngữ: Tiếng Việt."));
  }

  #[test]
  fn schema_declares_required_fields() {
    let s = quiz_schema();
    assert_eq!(s["type"], "ARRAY");
    assert_eq!(s["items"]["required"].as_array().unwrap().len(), 4);
  }
}
