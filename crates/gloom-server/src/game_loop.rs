//! Game loop thread: runs the simulation engine at 60Hz and fans out results.
//!
//! The engine is created inside this thread and never leaves it.
//! Commands arrive via `mpsc` channel and are applied between ticks. After each
//! tick the one-shot events and then the full snapshot are broadcast through
//! the connection hub, and the snapshot is stored in shared state for `/health`.

use std::ops::ControlFlow;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use gloom_core::commands::{ClientMessage, SimCommand};
use gloom_core::constants::TICK_RATE;
use gloom_core::events::ServerMessage;
use gloom_core::state::GameStateSnapshot;
use gloom_core::types::PlayerId;
use gloom_sim::engine::{SimConfig, SimulationEngine};

use crate::error::ServerError;
use crate::hub::ConnectionHub;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for connection handlers to use.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<mpsc::Sender<GameLoopCommand>, ServerError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("gloom-game-loop".into())
        .spawn(move || {
            let game = GameLoop::new(SimulationEngine::new(config));
            run_game_loop(game, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Engine plus the clients it talks to.
pub struct GameLoop {
    engine: SimulationEngine,
    hub: ConnectionHub,
}

impl GameLoop {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            engine,
            hub: ConnectionHub::new(),
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn hub(&self) -> &ConnectionHub {
        &self.hub
    }

    /// Apply one command. Breaks on shutdown.
    pub fn handle(&mut self, command: GameLoopCommand) -> ControlFlow<()> {
        match command {
            GameLoopCommand::Connect { player, outbox } => {
                info!("{player} connected");
                self.hub.connect(player, outbox);
                self.send_world_data(player);
                self.engine.queue_command(SimCommand::Join(player));
                self.hub.broadcast(&ServerMessage::PlayerJoined(player));
            }
            GameLoopCommand::Disconnect(player) => {
                info!("{player} disconnected");
                self.hub.disconnect(player);
                self.engine.queue_command(SimCommand::Leave(player));
                self.hub.broadcast(&ServerMessage::PlayerLeft(player));
            }
            GameLoopCommand::Client { player, message } => match message {
                ClientMessage::PlayerInput(input) => {
                    self.engine.queue_command(SimCommand::Input { player, input });
                }
                ClientMessage::AggroAll => {
                    debug!("{player} requested aggro");
                    self.engine.queue_command(SimCommand::AggroAll { player });
                }
                ClientMessage::RequestWorldData => self.send_world_data(player),
            },
            GameLoopCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Advance one tick and broadcast its events, then its snapshot.
    pub fn step(&mut self, dt: Duration) -> GameStateSnapshot {
        let output = self.engine.tick(dt);
        for event in output.events {
            self.hub.broadcast(&ServerMessage::from(event));
        }
        self.hub
            .broadcast(&ServerMessage::GameState(output.snapshot.clone()));
        output.snapshot
    }

    fn send_world_data(&mut self, player: PlayerId) {
        let layout = self.engine.layout().clone();
        self.hub.send_to(player, &ServerMessage::WorldData(layout));
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut game: GameLoop,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if game.handle(command).is_break() {
                        info!("game loop shutting down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick by the wall-clock time since the last one
        let now = Instant::now();
        let snapshot = game.step(now - last_tick);
        last_tick = now;

        // 3. Store latest snapshot for health queries
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            warn!("tick overran by {:?}, re-anchoring", now - next_tick_time);
            next_tick_time = now;
        }
    }
}
