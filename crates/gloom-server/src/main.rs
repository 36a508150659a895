use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use log::info;

use gloom_server::core::state::GameStateSnapshot;
use gloom_server::config::ServerConfig;
use gloom_server::game_loop;
use gloom_server::state::{AppState, GameLoopCommand};
use gloom_server::ws;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    let addr = config.addr()?;

    let latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>> = Arc::default();
    let command_tx = game_loop::spawn_game_loop(config.sim_config(), latest_snapshot.clone())?;
    let state = AppState::new(command_tx, latest_snapshot);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("GLOOM server listening on {addr}");

    axum::serve(listener, ws::router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = state.send(GameLoopCommand::Shutdown);
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
