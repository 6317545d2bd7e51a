//! Application state: the quiz pipeline, chat responder and provider choice.
//!
//! Built once at startup. The provider is selected from the environment here
//! and never changes afterwards.

use tracing::{info, instrument, warn};

use crate::cache::QuizCache;
use crate::chat::ChatResponder;
use crate::config::{load_agent_config_from_env, AgentConfig};
use crate::providers::{select_from_env, SharedGenerator};
use crate::quiz::QuizPipeline;

#[derive(Clone)]
pub struct AppState {
    pub quiz: QuizPipeline,
    pub chat: ChatResponder,
    pub provider: Option<&'static str>,
}

impl AppState {
    /// Build state from env: load config, pick a provider, wire the pipeline.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_agent_config_from_env().unwrap_or_default();
        let generator = select_from_env();
        if generator.is_none() {
            warn!(target: "vn_diplomacy_backend", "No GROQ_API_KEY or GEMINI_API_KEY; quiz and chat are unavailable.");
        }
        Self::with_generator(generator, cfg)
    }

    /// Composition root shared by `new` and tests.
    pub fn with_generator(generator: Option<SharedGenerator>, cfg: AgentConfig) -> Self {
        let provider = generator.as_ref().map(|g| g.name());
        info!(
            target: "vn_diplomacy_backend",
            provider = provider.unwrap_or("none"),
            target_questions = cfg.quiz.target_questions,
            max_attempts = cfg.quiz.max_attempts,
            topic_hints = cfg.topic_hints.len(),
            "Application state ready"
        );

        let quiz = QuizPipeline::new(
            generator.clone(),
            QuizCache::new(),
            cfg.prompts.clone(),
            cfg.topic_hints,
            cfg.quiz,
        );
        let chat = ChatResponder::new(generator, cfg.prompts);

        Self { quiz, chat, provider }
    }
}
