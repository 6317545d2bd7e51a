//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers), tighten for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/regions", get(http::http_get_regions))
        .route("/api/v1/regions/:id", get(http::http_get_region_details))
        .route("/api/v1/quiz", get(http::http_get_quiz).delete(http::http_delete_quiz))
        .route("/api/v1/quiz/grade", post(http::http_post_grade))
        .route("/api/v1/chat", post(http::http_post_chat))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::AgentConfig;
    use crate::providers::testing::{valid_quiz_json, ScriptedGenerator};

    fn app(stub: Option<Arc<ScriptedGenerator>>) -> Router {
        let generator = stub.map(|s| s as crate::providers::SharedGenerator);
        build_router(Arc::new(AppState::with_generator(generator, AgentConfig::default())))
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_provider() {
        let (status, body) = call(&app(None), get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert!(body["provider"].is_null());
        assert_eq!(body["cachedQuizzes"], 0);

        let stub = Arc::new(ScriptedGenerator::texts(Vec::<String>::new()));
        let (_, body) = call(&app(Some(stub)), get("/api/v1/health")).await;
        assert_eq!(body["provider"], "scripted");
    }

    #[tokio::test]
    async fn regions_and_details() {
        let app = app(None);
        let (_, list) = call(&app, get("/api/v1/regions?lang=en")).await;
        assert_eq!(list.as_array().unwrap().len(), 5);
        assert_eq!(list[3]["id"], "ASEAN");
        assert!(!list[3]["shortDescription"].as_str().unwrap().is_empty());

        let (_, details) = call(&app, get("/api/v1/regions/APEC")).await;
        assert_eq!(details["milestones"][0]["event"], "Chính thức trở thành thành viên APEC.");
    }

    #[tokio::test]
    async fn unknown_language_is_rejected() {
        let (status, _) = call(&app(None), get("/api/v1/regions?lang=fr")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn quiz_grade_and_invalidate_flow() {
        let stub = Arc::new(ScriptedGenerator::texts([valid_quiz_json(10), valid_quiz_json(10)]));
        let app = app(Some(stub.clone()));

        let (status, quiz) = call(&app, get("/api/v1/quiz?topic=ASEAN&lang=vi")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quiz["questions"].as_array().unwrap().len(), 10);
        assert_eq!(quiz["questions"][0]["correctAnswerIndex"], 0);
        assert_eq!(quiz["degraded"], false);

        // questions i have answer i % 4; answer all correctly
        let answers: serde_json::Map<String, Value> =
            (0..10).map(|i| (i.to_string(), Value::from(i % 4))).collect();
        let (_, graded) = call(
            &app,
            post_json("/api/v1/quiz/grade", serde_json::json!({ "topic": "ASEAN", "lang": "vi", "answers": answers })),
        )
        .await;
        assert_eq!(graded["available"], true);
        assert_eq!(graded["score"], 10);
        assert_eq!(graded["tier"], "perfect");

        let (_, removed) = call(
            &app,
            Request::delete("/api/v1/quiz?topic=ASEAN&lang=vi").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(removed["removed"], true);

        call(&app, get("/api/v1/quiz?topic=ASEAN&lang=vi")).await;
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn grading_without_cached_quiz_is_unavailable() {
        let (_, graded) = call(
            &app(None),
            post_json("/api/v1/quiz/grade", serde_json::json!({ "topic": "EU", "answers": {} })),
        )
        .await;
        assert_eq!(graded["available"], false);
        assert!(graded.get("score").is_none());
    }

    #[tokio::test]
    async fn quiz_without_provider_is_empty_not_an_error() {
        let (status, quiz) = call(&app(None), get("/api/v1/quiz?topic=EU&lang=en")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(quiz["questions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn chat_endpoint_returns_text() {
        let stub = Arc::new(ScriptedGenerator::texts(["ASEAN was founded in 1967."]));
        let (_, out) = call(
            &app(Some(stub)),
            post_json("/api/v1/chat", serde_json::json!({ "message": "When was ASEAN founded?", "lang": "en" })),
        )
        .await;
        assert_eq!(out["text"], "ASEAN was founded in 1967.");
    }
}
