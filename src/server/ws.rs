use crate::server::dispatch;
use crate::state::{AppState, CalcRequest, CalcResponse};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use portable_atomic::Ordering;
use std::sync::Arc;
use surebet_desk::errors::{Reason, ValidationError};

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One calculator form per socket: every inbound frame is a full
/// `CalcRequest` (the form's current state), answered by exactly one
/// `CalcResponse`. Nothing is kept between frames.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session = uuid::Uuid::new_v4();
    state.counters.ws_sessions.fetch_add(1, Ordering::Relaxed);
    tracing::info!(%session, "calculator session opened");

    let (mut sender, mut receiver) = socket.split();

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            _ => continue, // Ignore binary / ping / pong
        };

        let response = answer(&state, text.as_str());
        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(%session, error = %e, "response serialization failed");
                continue;
            }
        };

        if sender.send(Message::Text(json.into())).await.is_err() {
            break;
        }
        state.counters.ws_messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    tracing::info!(%session, "calculator session closed");
}

fn answer(state: &AppState, text: &str) -> CalcResponse {
    let response = match serde_json::from_str::<CalcRequest>(text) {
        Ok(request) => dispatch::evaluate(request, &state.config),
        Err(e) => {
            tracing::debug!(error = %e, "malformed calculator frame");
            ValidationError::new("request", Reason::Malformed).into()
        }
    };
    state.counters.record(&response);
    response
}
