//! Core behaviors shared by both HTTP and WebSocket handlers.

use tracing::{info, instrument};

use crate::content;
use crate::domain::{Language, RegionContent, RegionSummary};
use crate::grading::grade;
use crate::protocol::{GradeIn, GradeOut, QuizOut};
use crate::state::AppState;

pub fn do_regions(lang: Language) -> Vec<RegionSummary> {
  content::regions(lang)
}

pub fn do_region_details(region_id: &str, lang: Language) -> RegionContent {
  content::region_details(region_id, lang)
}

#[instrument(level = "info", skip(state), fields(%topic, %lang))]
pub async fn do_quiz(state: &AppState, topic: &str, lang: Language) -> QuizOut {
  let quiz = state.quiz.get_quiz(topic, lang).await;
  QuizOut {
    topic: topic.to_string(),
    language: lang,
    degraded: state.quiz.is_degraded(&quiz),
    questions: quiz.as_ref().clone(),
  }
}

pub async fn do_invalidate_quiz(state: &AppState, topic: &str, lang: Language) -> bool {
  let removed = state.quiz.cache().invalidate(topic, lang).await;
  info!(target: "quiz", %topic, %lang, removed, "Quiz cache entry invalidated");
  removed
}

/// Grades against the cached quiz only; never triggers generation.
#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, lang = %body.lang, answered = body.answers.len()))]
pub async fn do_grade(state: &AppState, body: &GradeIn) -> GradeOut {
  match state.quiz.cache().get(&body.topic, body.lang).await {
    Some(quiz) => {
      let report = grade(&quiz, &body.answers, body.lang);
      info!(target: "quiz", topic = %body.topic, score = report.score, total = report.total, "Quiz graded");
      GradeOut { available: true, report: Some(report) }
    }
    None => GradeOut { available: false, report: None },
  }
}

pub async fn do_chat(state: &AppState, message: &str, lang: Language) -> String {
  state.chat.chat(message, lang).await
}
