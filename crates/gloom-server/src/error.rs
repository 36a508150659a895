use std::net::AddrParseError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },
    #[error("failed to spawn game loop thread: {0}")]
    GameLoopSpawn(#[from] std::io::Error),
    #[error("game loop is no longer running")]
    GameLoopClosed,
}
