//! GLOOM game server.
//!
//! This crate wires the headless simulation to clients: a dedicated game
//! loop thread owns the engine, and an axum websocket layer feeds it
//! commands and fans its output back out.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod hub;
pub mod state;
pub mod ws;

pub use gloom_core as core;
