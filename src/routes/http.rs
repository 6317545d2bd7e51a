//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let cached_quizzes = state.quiz.cache().len().await;
  Json(HealthOut { ok: true, provider: state.provider, cached_quizzes })
}

#[instrument(level = "info", fields(lang = %q.lang))]
pub async fn http_get_regions(Query(q): Query<LangQuery>) -> impl IntoResponse {
  Json(do_regions(q.lang))
}

#[instrument(level = "info", fields(%id, lang = %q.lang))]
pub async fn http_get_region_details(
  Path(id): Path<String>,
  Query(q): Query<LangQuery>,
) -> impl IntoResponse {
  Json(do_region_details(&id, q.lang))
}

#[instrument(level = "info", skip(state), fields(topic = %q.topic, lang = %q.lang))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuizQuery>,
) -> impl IntoResponse {
  let out = do_quiz(&state, &q.topic, q.lang).await;
  info!(target: "quiz", topic = %q.topic, count = out.questions.len(), degraded = out.degraded, "HTTP quiz served");
  Json(out)
}

#[instrument(level = "info", skip(state), fields(topic = %q.topic, lang = %q.lang))]
pub async fn http_delete_quiz(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuizQuery>,
) -> impl IntoResponse {
  let removed = do_invalidate_quiz(&state, &q.topic, q.lang).await;
  Json(InvalidateOut { removed })
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic))]
pub async fn http_post_grade(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GradeIn>,
) -> impl IntoResponse {
  Json(do_grade(&state, &body).await)
}

#[instrument(level = "info", skip(state, body), fields(message_len = body.message.len(), lang = %body.lang))]
pub async fn http_post_chat(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatIn>,
) -> impl IntoResponse {
  let text = do_chat(&state, &body.message, body.lang).await;
  info!(target: "chat", reply_len = text.len(), "HTTP chat served");
  Json(ChatOut { text })
}
