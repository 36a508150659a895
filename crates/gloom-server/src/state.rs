//! State shared between the websocket handlers and the game loop thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;

use gloom_core::commands::ClientMessage;
use gloom_core::state::GameStateSnapshot;
use gloom_core::types::PlayerId;

use crate::error::ServerError;

/// Per-connection queue of serialized outbound frames.
pub type Outbox = UnboundedSender<String>;

/// Commands sent from connection handlers to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A client connected; frames for it go to `outbox`.
    Connect { player: PlayerId, outbox: Outbox },
    /// A client's connection closed.
    Disconnect(PlayerId),
    /// A parsed message from a client.
    Client {
        player: PlayerId,
        message: ClientMessage,
    },
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state, cloned into every axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    next_player_id: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        command_tx: mpsc::Sender<GameLoopCommand>,
        latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    ) -> Self {
        Self {
            command_tx,
            latest_snapshot,
            next_player_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Hand out the next connection id. Ids are never reused.
    pub fn next_player_id(&self) -> PlayerId {
        PlayerId(self.next_player_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn send(&self, command: GameLoopCommand) -> Result<(), ServerError> {
        self.command_tx
            .send(command)
            .map_err(|_| ServerError::GameLoopClosed)
    }

    /// Number of players in the latest snapshot.
    pub fn player_count(&self) -> usize {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.as_ref().map(|snap| snap.players.len()))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_ids_are_unique_and_increasing() {
        let (tx, _rx) = mpsc::channel();
        let state = AppState::new(tx, Arc::new(Mutex::new(None)));
        let clone = state.clone();
        let a = state.next_player_id();
        let b = clone.next_player_id();
        assert!(b > a);
    }

    #[test]
    fn test_player_count_without_snapshot() {
        let (tx, _rx) = mpsc::channel();
        let state = AppState::new(tx, Arc::new(Mutex::new(None)));
        assert_eq!(state.player_count(), 0);
    }

    #[test]
    fn test_send_after_loop_exit_fails() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let state = AppState::new(tx, Arc::new(Mutex::new(None)));
        assert!(matches!(
            state.send(GameLoopCommand::Shutdown),
            Err(ServerError::GameLoopClosed)
        ));
    }
}
