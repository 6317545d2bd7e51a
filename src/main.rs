//! Vietnam Diplomacy · Study Backend
//!
//! - Axum HTTP + WebSocket API
//! - Static region content (UN, EU, Africa, ASEAN, APEC) in Vietnamese and English
//! - AI quizzes and chat via Groq or Gemini (via environment variables)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   GROQ_API_KEY          : enables Groq; takes precedence over Gemini
//!   GROQ_BASE_URL         : default "https://api.groq.com/openai/v1"
//!   GROQ_MODEL            : default "llama-3.3-70b-versatile"
//!   GEMINI_API_KEY        : enables Gemini when no Groq key is set
//!   GEMINI_BASE_URL       : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL          : default "gemini-2.5-flash"
//!   PROVIDER_TIMEOUT_SECS : outbound request timeout (default 20)
//!   AGENT_CONFIG_PATH     : path to TOML config (prompts, quiz tuning, topic hints)
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod content;
mod providers;
mod prompt;
mod recovery;
mod cache;
mod quiz;
mod grading;
mod chat;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "vn_diplomacy_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "vn_diplomacy_backend", error = %e, "Failed to listen for shutdown signal");
    return;
  }
  info!(target: "vn_diplomacy_backend", "Shutdown signal received");
}
