//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "vn_diplomacy_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "vn_diplomacy_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "vn_diplomacy_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "vn_diplomacy_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "vn_diplomacy_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
pub(crate) async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Regions { lang } => ServerWsMessage::Regions { regions: do_regions(lang) },

    ClientWsMessage::RegionDetails { region_id, lang } => {
      ServerWsMessage::RegionDetails { content: do_region_details(&region_id, lang) }
    }

    ClientWsMessage::Quiz { topic, lang } => {
      let quiz = do_quiz(state, &topic, lang).await;
      info!(target: "quiz", %topic, count = quiz.questions.len(), "WS quiz served");
      ServerWsMessage::Quiz { quiz }
    }

    ClientWsMessage::Chat { message, lang } => {
      ServerWsMessage::ChatReply { text: do_chat(state, &message, lang).await }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::config::AgentConfig;
  use crate::providers::testing::{valid_quiz_json, ScriptedGenerator};

  fn state(stub: Arc<ScriptedGenerator>) -> AppState {
    AppState::with_generator(Some(stub as crate::providers::SharedGenerator), AgentConfig::default())
  }

  #[tokio::test]
  async fn messages_dispatch_to_matching_replies() {
    let stub = Arc::new(ScriptedGenerator::texts([valid_quiz_json(10), "Hello".to_string()]));
    let st = state(stub);

    let ping: ClientWsMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
    assert!(matches!(handle_client_ws(ping, &st).await, ServerWsMessage::Pong));

    let quiz: ClientWsMessage = serde_json::from_str(r#"{"type":"quiz","topic":"ASEAN","lang":"en"}"#).unwrap();
    match handle_client_ws(quiz, &st).await {
      ServerWsMessage::Quiz { quiz } => {
        assert_eq!(quiz.questions.len(), 10);
        assert!(!quiz.degraded);
      }
      other => panic!("unexpected reply {other:?}"),
    }

    let chat: ClientWsMessage = serde_json::from_str(r#"{"type":"chat","message":"hi"}"#).unwrap();
    match handle_client_ws(chat, &st).await {
      ServerWsMessage::ChatReply { text } => assert_eq!(text, "Hello"),
      other => panic!("unexpected reply {other:?}"),
    }
  }

  #[tokio::test]
  async fn region_messages_default_to_vietnamese() {
    let st = state(Arc::new(ScriptedGenerator::texts(Vec::<String>::new())));
    let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"region_details","regionId":"EU"}"#).unwrap();
    match handle_client_ws(msg, &st).await {
      ServerWsMessage::RegionDetails { content } => assert_eq!(content.milestones[0].year, "1990"),
      other => panic!("unexpected reply {other:?}"),
    }
  }

  #[test]
  fn reply_serializes_with_type_tag() {
    let out = serde_json::to_value(ServerWsMessage::ChatReply { text: "x".into() }).unwrap();
    assert_eq!(out["type"], "chat_reply");
    assert_eq!(out["text"], "x");
  }
}
