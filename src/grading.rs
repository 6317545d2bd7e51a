//! Scoring a submitted quiz against the cached answer key.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Language, QuizQuestion};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  Perfect,
  Good,
  Average,
  Poor,
}

impl Tier {
  fn from_percentage(pct: u32) -> Self {
    match pct {
      100.. => Tier::Perfect,
      80..=99 => Tier::Good,
      50..=79 => Tier::Average,
      _ => Tier::Poor,
    }
  }

  pub fn message(self, lang: Language) -> &'static str {
    match self {
      Tier::Perfect => lang.pick("Xuất sắc! Bạn là nhà ngoại giao tài ba!", "Excellent! You are a master diplomat!"),
      Tier::Good => lang.pick("Rất tốt! Bạn có kiến thức vững chắc.", "Very good! Solid knowledge."),
      Tier::Average => lang.pick("Khá tốt. Hãy ôn lại thêm nhé.", "Not bad. Review a bit more."),
      Tier::Poor => lang.pick("Cần cố gắng thêm.", "Keep trying."),
    }
  }
}

/// Per-question outcome, for the answer review screen.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReview {
  pub id: usize,
  pub chosen: Option<usize>,
  pub correct_answer_index: usize,
  pub correct: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
  pub score: usize,
  pub total: usize,
  pub percentage: u32,
  pub tier: Tier,
  pub message: String,
  pub review: Vec<AnswerReview>,
}

/// `answers` maps question id to the chosen option index. Unanswered counts as wrong.
pub fn grade(questions: &[QuizQuestion], answers: &HashMap<usize, usize>, lang: Language) -> GradeReport {
  let review: Vec<AnswerReview> = questions
    .iter()
    .map(|q| {
      let chosen = answers.get(&q.id).copied();
      AnswerReview {
        id: q.id,
        chosen,
        correct_answer_index: q.correct_answer_index,
        correct: chosen == Some(q.correct_answer_index),
      }
    })
    .collect();

  let score = review.iter().filter(|r| r.correct).count();
  let total = questions.len();
  let percentage = if total == 0 { 0 } else { ((score as f64 / total as f64) * 100.0).round() as u32 };
  let tier = Tier::from_percentage(percentage);

  GradeReport { score, total, percentage, tier, message: tier.message(lang).to_string(), review }
}
