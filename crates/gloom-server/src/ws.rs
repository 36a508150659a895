//! HTTP and websocket surface.
//!
//! `/ws` upgrades to a websocket carrying JSON text frames in both
//! directions; `/health` reports liveness and the current player count.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use tokio::sync::mpsc;

use gloom_core::commands::ClientMessage;
use gloom_core::types::PlayerId;

use crate::state::{AppState, GameLoopCommand};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub players: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        players: state.player_count(),
    })
}

async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let player = state.next_player_id();
    let (mut socket_sender, mut socket_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    if let Err(err) = state.send(GameLoopCommand::Connect { player, outbox: tx }) {
        warn!("{player} rejected: {err}");
        return;
    }

    let send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if socket_sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = socket_receiver.next().await {
        match msg {
            Message::Text(text) => {
                let Some(message) = parse_client_message(player, &text) else {
                    continue;
                };
                if state.send(GameLoopCommand::Client { player, message }).is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    let _ = state.send(GameLoopCommand::Disconnect(player));
    send_task.abort();
}

/// Malformed frames are dropped.
fn parse_client_message(player: PlayerId, text: &str) -> Option<ClientMessage> {
    match serde_json::from_str(text) {
        Ok(message) => Some(message),
        Err(err) => {
            debug!("{player} sent unparseable frame: {err}");
            None
        }
    }
}
