//! Entity registry: the hecs world plus id → entity indices for players,
//! mobs and bullets.
//!
//! All mutation from outside the tick goes through this narrow API. Systems
//! query the world directly but despawn through the registry so the indices
//! stay in sync with the world.

use std::collections::HashMap;

use hecs::{Entity, World};
use log::{debug, warn};
use rand::Rng;

use gloom_core::commands::PlayerInput;
use gloom_core::components::{Aggro, Bullet, InputState, Mob, MobBrain, Player};
use gloom_core::constants::{BULLET_SPEED, MOB_HP, PLAYER_MAX_HP};
use gloom_core::enums::EquipmentTier;
use gloom_core::types::{BulletId, MobId, PlayerId, Position, Rect, Velocity};
use gloom_mob_ai::fsm::random_direction;
use gloom_procgen::{random_spawn_point, GenerationParams};

pub struct EntityRegistry {
    world: World,
    players: HashMap<PlayerId, Entity>,
    mobs: HashMap<MobId, Entity>,
    bullets: HashMap<BulletId, Entity>,
    next_mob_id: u64,
    next_bullet_id: u64,
    player_spawn: Position,
}

impl EntityRegistry {
    /// Empty registry; new players appear at `player_spawn`.
    pub fn new(player_spawn: Position) -> Self {
        Self {
            world: World::new(),
            players: HashMap::new(),
            mobs: HashMap::new(),
            bullets: HashMap::new(),
            next_mob_id: 0,
            next_bullet_id: 0,
            player_spawn,
        }
    }

    /// Spawn a player at the spawn point with full hp and the default tier.
    /// Returns false if the id is already present.
    pub fn add_player(&mut self, id: PlayerId) -> bool {
        if self.players.contains_key(&id) {
            return false;
        }

        let entity = self.world.spawn((
            Player {
                id,
                aim_angle: 0.0,
                hp: PLAYER_MAX_HP,
                tier: EquipmentTier::default(),
                last_shot_ms: None,
            },
            InputState::default(),
            self.player_spawn,
            Velocity::ZERO,
        ));
        self.players.insert(id, entity);
        debug!("{id} spawned at ({:.0}, {:.0})", self.player_spawn.x, self.player_spawn.y);
        true
    }

    /// Remove a player. Every mob chasing it falls back to wandering with a
    /// fresh random heading. Returns the number of mobs released, or `None`
    /// if the player was unknown.
    pub fn remove_player<R: Rng + ?Sized>(&mut self, id: PlayerId, rng: &mut R) -> Option<usize> {
        let entity = self.players.remove(&id)?;
        if self.world.despawn(entity).is_err() {
            warn!("{id} had no live entity to despawn");
        }

        let mut released = 0;
        for (_entity, brain) in self.world.query_mut::<&mut MobBrain>() {
            if brain.target() == Some(id) {
                brain.aggro = None;
                brain.direction = random_direction(rng);
                brain.direction_timer_ms = 0.0;
                released += 1;
            }
        }
        debug!("{id} removed, {released} mobs released");
        Some(released)
    }

    /// Spawn a wandering mob at a random point clear of `walls`.
    pub fn spawn_mob<R: Rng + ?Sized>(
        &mut self,
        params: &GenerationParams,
        walls: &[Rect],
        rng: &mut R,
    ) -> MobId {
        let id = MobId(self.next_mob_id);
        self.next_mob_id += 1;

        let position = random_spawn_point(params, walls, rng);
        let brain = MobBrain {
            aggro: None,
            direction: random_direction(rng),
            direction_timer_ms: 0.0,
            last_attack_ms: None,
        };
        let entity = self.world.spawn((
            Mob {
                id,
                hp: MOB_HP,
                alive: true,
            },
            brain,
            position,
            Velocity::ZERO,
        ));
        self.mobs.insert(id, entity);
        id
    }

    /// Spawn a bullet travelling along `angle` at bullet speed.
    pub fn spawn_bullet(
        &mut self,
        owner: PlayerId,
        position: Position,
        angle: f64,
        now_ms: f64,
    ) -> BulletId {
        let id = BulletId(self.next_bullet_id);
        self.next_bullet_id += 1;

        let entity = self.world.spawn((
            Bullet {
                id,
                owner,
                created_ms: now_ms,
                last_position: position,
            },
            position,
            Velocity::from_angle(angle, BULLET_SPEED),
        ));
        self.bullets.insert(id, entity);
        id
    }

    pub fn despawn_mob(&mut self, id: MobId) -> bool {
        match self.mobs.remove(&id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    pub fn despawn_bullet(&mut self, id: BulletId) -> bool {
        match self.bullets.remove(&id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Replace a player's pending input (latest wins). The input is
    /// sanitized; a non-finite aim angle keeps the previous aim.
    pub fn set_input(&mut self, id: PlayerId, input: PlayerInput) -> bool {
        let Some(&entity) = self.players.get(&id) else {
            return false;
        };
        let Ok(mut state) = self.world.get::<&mut InputState>(entity) else {
            return false;
        };

        let mut input = input.sanitized();
        if !input.aim_angle.is_finite() {
            input.aim_angle = state.input.aim_angle;
        }
        state.input = input;
        true
    }

    /// Point every living mob at `player`. Returns how many mobs were
    /// retargeted (zero for an unknown player).
    pub fn aggro_all(&mut self, player: PlayerId) -> usize {
        let Some(position) = self.player_position(player) else {
            return 0;
        };

        let mut count = 0;
        for (_entity, (mob, brain)) in self.world.query_mut::<(&Mob, &mut MobBrain)>() {
            if mob.alive {
                brain.aggro = Some(Aggro { player, position });
                count += 1;
            }
        }
        debug!("{player} pulled aggro of {count} mobs");
        count
    }

    pub fn player_position(&self, id: PlayerId) -> Option<Position> {
        let entity = *self.players.get(&id)?;
        self.world.get::<&Position>(entity).ok().map(|pos| *pos)
    }

    /// Every player's position, ordered by id.
    pub fn player_positions(&self) -> Vec<(PlayerId, Position)> {
        let mut players: Vec<(PlayerId, Position)> = self
            .world
            .query::<(&Player, &Position)>()
            .iter()
            .map(|(_, (player, pos))| (player.id, *pos))
            .collect();
        players.sort_by_key(|(id, _)| *id);
        players
    }

    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn player_entity(&self, id: PlayerId) -> Option<Entity> {
        self.players.get(&id).copied()
    }

    pub fn mob_entity(&self, id: MobId) -> Option<Entity> {
        self.mobs.get(&id).copied()
    }

    pub fn bullet_entity(&self, id: BulletId) -> Option<Entity> {
        self.bullets.get(&id).copied()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.len()
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn player_spawn(&self) -> Position {
        self.player_spawn
    }

    /// Read-only view of the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
