//! Simulation constants and tuning parameters.
//!
//! Speeds are in world units per second, times in milliseconds unless the
//! name says otherwise.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Nominal milliseconds per tick.
pub const TICK_INTERVAL_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Upper bound on the wall-clock delta applied in a single tick.
pub const MAX_TICK_DELTA_MS: f64 = 250.0;

// --- World ---

pub const WORLD_WIDTH: f64 = 3000.0;
pub const WORLD_HEIGHT: f64 = 3000.0;

// --- World generation: walls ---

/// Target number of interior walls.
pub const WALL_COUNT: usize = 40;
pub const WALL_MIN_SIZE: f64 = 100.0;
pub const WALL_MAX_SIZE: f64 = 400.0;

/// Minimum gap between any two walls.
pub const WALL_PADDING: f64 = 30.0;

/// Distance kept clear between walls and the world edge.
pub const WALL_EDGE_MARGIN: f64 = 100.0;

/// Radius of the wall-free zone around the world centre (player spawn).
pub const SPAWN_SAFE_RADIUS: f64 = 400.0;

/// Candidate draws per wall before the wall is skipped.
pub const WALL_MAX_ATTEMPTS: u32 = 50;

// --- World generation: lamps ---

pub const LAMP_COUNT: usize = 12;

/// Base light radius.
pub const LAMP_RANGE: f64 = 200.0;

/// Uniform jitter applied to the light radius (±).
pub const LAMP_RANGE_JITTER: f64 = 30.0;

pub const LAMP_EDGE_MARGIN: f64 = 100.0;

/// Lamps must sit at least this far outside every wall.
pub const LAMP_WALL_PADDING: f64 = 50.0;

/// Minimum pairwise distance between lamps.
pub const LAMP_MIN_SEPARATION: f64 = 250.0;

/// Candidate draws per lamp before the lamp is skipped.
pub const LAMP_MAX_ATTEMPTS: u32 = 50;

// --- Player ---

pub const PLAYER_RADIUS: f64 = 20.0;

/// Full movement speed (moving straight toward the aim direction).
pub const PLAYER_SPEED: f64 = 240.0;

pub const PLAYER_MAX_HP: i32 = 100;

/// Extra clearance from the world edge applied while moving.
pub const PLAYER_BOUNDS_MARGIN: f64 = 10.0;

/// Speed factor when moving perpendicular to the aim direction.
/// Final factor is `BASE + SWING * dot(move, aim)`.
pub const PLAYER_STRAFE_BASE: f64 = 0.7;
pub const PLAYER_STRAFE_SWING: f64 = 0.3;

// --- Combat ---

pub const BULLET_SPEED: f64 = 900.0;
pub const BULLET_RADIUS: f64 = 3.0;
pub const BULLET_LIFETIME_MS: f64 = 3000.0;

/// Minimum time between two shots from the same player.
pub const FIRE_COOLDOWN_MS: f64 = 120.0;

/// Hit points removed from a mob per bullet, regardless of weapon.
pub const BULLET_DAMAGE: i32 = 1;

/// Muzzle offset along the aim direction.
pub const MUZZLE_FORWARD_OFFSET: f64 = 25.0;

/// Muzzle offset to the right of the aim direction.
pub const MUZZLE_SIDE_OFFSET: f64 = 10.0;

// --- Mobs ---

/// Living mob population (constant: every death respawns one).
pub const MOB_COUNT: usize = 15;
pub const MOB_RADIUS: f64 = 18.0;
pub const MOB_SPEED: f64 = 90.0;
pub const MOB_HP: i32 = 5;

/// Wander direction change interval.
pub const MOB_DIRECTION_CHANGE_INTERVAL_MS: f64 = 2000.0;

/// Extra clearance from the world edge applied while moving.
pub const MOB_BOUNDS_MARGIN: f64 = 50.0;

/// Un-targeted mobs aggro onto the first player within this distance.
pub const MOB_AGGRO_RADIUS: f64 = 300.0;

/// Aggroed mobs stop moving inside this distance of their target.
pub const MOB_STOP_RADIUS: f64 = 35.0;

/// Aggroed mobs may attack while their target is within this distance.
pub const MOB_ATTACK_RANGE: f64 = 40.0;

pub const MOB_ATTACK_COOLDOWN_MS: f64 = 1000.0;

/// Inclusive attack damage range.
pub const MOB_DAMAGE_MIN: i32 = 7;
pub const MOB_DAMAGE_MAX: i32 = 10;

// --- Mob spawning ---

pub const MOB_SPAWN_EDGE_MARGIN: f64 = 100.0;

/// Spawn candidates must sit at least this far outside every wall.
pub const MOB_SPAWN_WALL_PADDING: f64 = 50.0;

/// Spawn candidates closer than this to the world centre are rejected.
pub const MOB_SPAWN_EXCLUSION_RADIUS: f64 = 500.0;

pub const MOB_SPAWN_MAX_ATTEMPTS: u32 = 100;
