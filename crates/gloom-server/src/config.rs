//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

use gloom_sim::engine::SimConfig;

use crate::error::ServerError;

#[derive(Debug, Clone, Parser)]
#[command(name = "gloom-server", about = "Authoritative GLOOM game server")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "GLOOM_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Fixed RNG seed for a reproducible layout. Random when omitted.
    #[arg(long, env = "GLOOM_SEED")]
    pub seed: Option<u64>,
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            ..Default::default()
        }
    }
}
