//! Connection hub: fans serialized server messages out to client outboxes.
//!
//! Lives on the game loop thread. Each message is serialized once and the
//! text cloned per recipient. Outboxes whose receiver has gone away are
//! pruned on the next send.

use std::collections::BTreeMap;

use log::warn;

use gloom_core::events::ServerMessage;
use gloom_core::types::PlayerId;

use crate::state::Outbox;

#[derive(Default)]
pub struct ConnectionHub {
    outboxes: BTreeMap<PlayerId, Outbox>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, player: PlayerId, outbox: Outbox) {
        self.outboxes.insert(player, outbox);
    }

    pub fn disconnect(&mut self, player: PlayerId) -> bool {
        self.outboxes.remove(&player).is_some()
    }

    pub fn len(&self) -> usize {
        self.outboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outboxes.is_empty()
    }

    /// Send to one client. Returns false if it is unknown or gone.
    pub fn send_to(&mut self, player: PlayerId, message: &ServerMessage) -> bool {
        let Some(text) = encode(message) else {
            return false;
        };
        let delivered = self
            .outboxes
            .get(&player)
            .is_some_and(|outbox| outbox.send(text).is_ok());
        if !delivered {
            self.outboxes.remove(&player);
        }
        delivered
    }

    /// Send to every connected client.
    pub fn broadcast(&mut self, message: &ServerMessage) {
        if self.outboxes.is_empty() {
            return;
        }
        let Some(text) = encode(message) else {
            return;
        };
        self.outboxes
            .retain(|_, outbox| outbox.send(text.clone()).is_ok());
    }
}

fn encode(message: &ServerMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("serialize message failed: {err}");
            None
        }
    }
}
