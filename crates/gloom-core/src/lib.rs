//! Core types and definitions for the GLOOM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, components, commands, wire messages, state snapshots and constants.
//! It has no dependency on the ECS, the network runtime or any randomness.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
