//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Field names are camelCase to match the front-end types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Language, QuizQuestion, RegionContent, RegionSummary};
use crate::grading::GradeReport;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Regions {
        #[serde(default)]
        lang: Language,
    },
    RegionDetails {
        #[serde(rename = "regionId")]
        region_id: String,
        #[serde(default)]
        lang: Language,
    },
    Quiz {
        topic: String,
        #[serde(default)]
        lang: Language,
    },
    Chat {
        message: String,
        #[serde(default)]
        lang: Language,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Regions { regions: Vec<RegionSummary> },
    RegionDetails { content: RegionContent },
    Quiz { quiz: QuizOut },
    ChatReply { text: String },
    Error { message: String },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Language,
}

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    pub topic: String,
    #[serde(default)]
    pub lang: Language,
}

#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub topic: String,
    pub language: Language,
    pub questions: Vec<QuizQuestion>,
    /// Fewer questions than the pipeline aims for.
    pub degraded: bool,
}

#[derive(Serialize)]
pub struct InvalidateOut {
    pub removed: bool,
}

#[derive(Deserialize)]
pub struct GradeIn {
    pub topic: String,
    #[serde(default)]
    pub lang: Language,
    /// question id -> chosen option index
    #[serde(default)]
    pub answers: HashMap<usize, usize>,
}

#[derive(Serialize)]
pub struct GradeOut {
    pub available: bool,
    #[serde(flatten)]
    pub report: Option<GradeReport>,
}

#[derive(Deserialize)]
pub struct ChatIn {
    pub message: String,
    #[serde(default)]
    pub lang: Language,
}
#[derive(Serialize)]
pub struct ChatOut {
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOut {
    pub ok: bool,
    pub provider: Option<&'static str>,
    pub cached_quizzes: usize,
}
