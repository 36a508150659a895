//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity registry and the static layout,
//! drains queued commands at tick boundaries, runs all systems and produces
//! a `GameStateSnapshot` plus the tick's one-shot events. Completely
//! headless (no transport dependency), enabling deterministic testing.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gloom_core::commands::SimCommand;
use gloom_core::constants::{MAX_TICK_DELTA_MS, MOB_COUNT};
use gloom_core::events::GameEvent;
use gloom_core::state::{GameStateSnapshot, WorldLayout};
use gloom_core::types::SimTime;
use gloom_mob_ai::profiles::MobProfile;
use gloom_procgen::{generate_layout, GenerationParams};

use crate::registry::EntityRegistry;
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. `None` draws from OS entropy; the same seed reproduces the
    /// same layout and, given the same commands and deltas, the same run.
    pub seed: Option<u64>,
    pub generation: GenerationParams,
    /// Constant mob population.
    pub mob_count: usize,
    pub mob_profile: MobProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            generation: GenerationParams::default(),
            mob_count: MOB_COUNT,
            mob_profile: MobProfile::default(),
        }
    }
}

/// Everything a tick produced.
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub snapshot: GameStateSnapshot,
    /// One-shot events in the order they happened.
    pub events: Vec<GameEvent>,
}

/// The simulation engine. Owns the registry and all sim state.
pub struct SimulationEngine {
    registry: EntityRegistry,
    layout: WorldLayout,
    params: GenerationParams,
    profile: MobProfile,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Generate a fresh layout and populate it.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = seeded_rng(config.seed);
        let layout = generate_layout(&config.generation, &mut rng);
        Self::assemble(config, layout, rng)
    }

    /// Populate a pre-built layout instead of generating one.
    pub fn with_layout(config: SimConfig, layout: WorldLayout) -> Self {
        let rng = seeded_rng(config.seed);
        Self::assemble(config, layout, rng)
    }

    fn assemble(config: SimConfig, layout: WorldLayout, mut rng: ChaCha8Rng) -> Self {
        let params = config.generation;
        let mut registry = EntityRegistry::new(params.center());
        for _ in 0..config.mob_count {
            registry.spawn_mob(&params, &layout.walls, &mut rng);
        }
        info!(
            "simulation ready: {} walls, {} lamps, {} mobs",
            layout.walls.len(),
            layout.lamps.len(),
            registry.mob_count()
        );

        Self {
            registry,
            layout,
            params,
            profile: config.mob_profile,
            time: SimTime::default(),
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` (clamped to `MAX_TICK_DELTA_MS`) and
    /// return the resulting snapshot and events.
    pub fn tick(&mut self, dt: Duration) -> TickOutput {
        let dt_ms = (dt.as_secs_f64() * 1000.0).min(MAX_TICK_DELTA_MS);

        self.process_commands();
        self.time.advance(dt_ms);
        self.run_systems(dt_ms);

        TickOutput {
            snapshot: systems::snapshot::build_snapshot(self.registry.world(), &self.time),
            events: std::mem::take(&mut self.events),
        }
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(self.registry.world(), &self.time)
    }

    /// The immutable static layout.
    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Mutable registry access for tests that stage entities directly.
    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Join(player) => {
                if !self.registry.add_player(player) {
                    debug!("{player} already present, join ignored");
                }
            }
            SimCommand::Leave(player) => {
                self.registry.remove_player(player, &mut self.rng);
            }
            SimCommand::Input { player, input } => {
                self.registry.set_input(player, input);
            }
            SimCommand::AggroAll { player } => {
                self.registry.aggro_all(player);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_ms: f64) {
        let now_ms = self.time.elapsed_ms;
        let dt_secs = dt_ms / 1000.0;

        // 1. Player input: aim, movement, firing
        systems::players::run(&mut self.registry, &self.params, now_ms, dt_secs, &mut self.events);
        // 2. Mob AI and movement
        systems::mob_ai::run(
            &mut self.registry,
            &self.params,
            &self.profile,
            now_ms,
            dt_ms,
            &mut self.rng,
            &mut self.events,
        );
        // 3. Bullet movement and expiry
        systems::projectiles::run(&mut self.registry, &self.params, now_ms, dt_secs);
        // 4. Collision resolution (includes mob respawn)
        systems::collision::run(
            &mut self.registry,
            &self.params,
            &self.layout.walls,
            &mut self.rng,
            &mut self.events,
        );
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
