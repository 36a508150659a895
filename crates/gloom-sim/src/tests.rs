//! Tests for the simulation engine, the registry, and the per-tick systems.

use std::time::Duration;

use glam::DVec2;

use gloom_core::commands::{MoveDir, PlayerInput, SimCommand};
use gloom_core::components::{MobBrain, Player};
use gloom_core::constants::*;
use gloom_core::enums::{EquipmentTier, MobState};
use gloom_core::events::GameEvent;
use gloom_core::state::{GameStateSnapshot, WorldLayout};
use gloom_core::types::{MobId, PlayerId, Position, Rect};
use gloom_procgen::GenerationParams;

use crate::engine::{SimConfig, SimulationEngine};
use crate::registry::EntityRegistry;
use crate::systems::players::{fire_ready, movement_velocity, muzzle_position};

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

fn dt() -> Duration {
    Duration::from_secs_f64(TICK_INTERVAL_MS / 1000.0)
}

fn config(seed: u64, mob_count: usize) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        mob_count,
        ..Default::default()
    }
}

fn engine_with_walls(walls: Vec<Rect>, mob_count: usize) -> SimulationEngine {
    SimulationEngine::with_layout(
        config(7, mob_count),
        WorldLayout {
            walls,
            lamps: Vec::new(),
        },
    )
}

fn input(x: f64, y: f64, aim_angle: f64, is_shooting: bool) -> PlayerInput {
    PlayerInput {
        move_dir: MoveDir { x, y },
        aim_angle,
        is_shooting,
    }
}

fn join(engine: &mut SimulationEngine, player: PlayerId) {
    engine.queue_command(SimCommand::Join(player));
    engine.tick(dt());
}

fn set_input(engine: &mut SimulationEngine, player: PlayerId, input: PlayerInput) {
    engine.queue_command(SimCommand::Input { player, input });
}

fn place_mob(engine: &mut SimulationEngine, id: MobId, position: Position) {
    let entity = engine.registry().mob_entity(id).unwrap();
    *engine
        .registry_mut()
        .world_mut()
        .get::<&mut Position>(entity)
        .unwrap() = position;
}

fn mob_brains(engine: &SimulationEngine) -> Vec<MobBrain> {
    let mut q = engine.registry().world().query::<&MobBrain>();
    q.iter().map(|(_, brain)| brain.clone()).collect()
}

fn player_hp(engine: &SimulationEngine, player: PlayerId) -> i32 {
    let entity = engine.registry().player_entity(player).unwrap();
    engine.registry().world().get::<&Player>(entity).unwrap().hp
}

fn assert_in_bounds(snap: &GameStateSnapshot, params: &GenerationParams) {
    for player in snap.players.values() {
        let p = player.position;
        assert!(
            (PLAYER_RADIUS..=params.width - PLAYER_RADIUS).contains(&p.x)
                && (PLAYER_RADIUS..=params.height - PLAYER_RADIUS).contains(&p.y),
            "{} out of bounds at ({}, {})",
            player.id,
            p.x,
            p.y
        );
    }
    for mob in &snap.mobs {
        let p = mob.position;
        assert!(
            (MOB_RADIUS..=params.width - MOB_RADIUS).contains(&p.x)
                && (MOB_RADIUS..=params.height - MOB_RADIUS).contains(&p.y),
            "{} out of bounds at ({}, {})",
            mob.id,
            p.x,
            p.y
        );
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(config(12345, MOB_COUNT));
    let mut engine_b = SimulationEngine::new(config(12345, MOB_COUNT));
    assert_eq!(engine_a.layout(), engine_b.layout());

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(SimCommand::Join(P1));
        set_input(engine, P1, input(1.0, 0.3, 0.5, true));
    }

    for _ in 0..300 {
        let out_a = engine_a.tick(dt());
        let out_b = engine_b.tick(dt());

        let json_a = serde_json::to_string(&out_a.snapshot).unwrap();
        let json_b = serde_json::to_string(&out_b.snapshot).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
        assert_eq!(out_a.events, out_b.events);
    }
}

#[test]
fn test_different_seeds_produce_different_layouts() {
    let engine_a = SimulationEngine::new(config(111, MOB_COUNT));
    let engine_b = SimulationEngine::new(config(222, MOB_COUNT));
    assert_ne!(engine_a.layout(), engine_b.layout());
}

// ---- Engine lifecycle ----

#[test]
fn test_startup_population() {
    let engine = SimulationEngine::new(config(3, MOB_COUNT));
    assert_eq!(engine.registry().mob_count(), MOB_COUNT);
    assert_eq!(engine.registry().player_count(), 0);
    assert!(!engine.layout().walls.is_empty());

    // No mob starts inside a padded wall.
    let snap = engine.snapshot();
    for mob in &snap.mobs {
        assert!(!gloom_physics::point_in_rects(
            &mob.position,
            &engine.layout().walls,
            MOB_SPAWN_WALL_PADDING
        ));
    }
}

#[test]
fn test_join_spawns_player_at_center() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);

    let snap = engine.snapshot();
    let player = &snap.players[&P1];
    assert_eq!(player.position, engine.params().center());
    assert_eq!(player.hp, PLAYER_MAX_HP);
    assert_eq!(player.equipped_tier, EquipmentTier::Common);
}

#[test]
fn test_duplicate_join_is_ignored() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    join(&mut engine, P1);
    assert_eq!(engine.registry().player_count(), 1);
}

#[test]
fn test_tick_advances_time() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    let out = engine.tick(Duration::from_millis(16));
    assert_eq!(out.snapshot.time.tick, 1);
    assert!((out.snapshot.timestamp - 16.0).abs() < 1e-9);
}

#[test]
fn test_tick_delta_is_clamped() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    engine.tick(Duration::from_secs(5));
    assert!((engine.time().elapsed_ms - MAX_TICK_DELTA_MS).abs() < 1e-9);
}

#[test]
fn test_input_for_unknown_player_is_dropped() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    set_input(&mut engine, P2, input(1.0, 0.0, 0.0, true));
    let out = engine.tick(dt());
    assert!(out.snapshot.players.is_empty());
    assert!(out.events.is_empty());
}

// ---- Bounds invariant ----

#[test]
fn test_positions_stay_in_bounds() {
    let mut engine = SimulationEngine::new(config(99, MOB_COUNT));
    let params = *engine.params();
    engine.queue_command(SimCommand::Join(P1));
    engine.queue_command(SimCommand::Join(P2));
    set_input(&mut engine, P1, input(-1.0, -1.0, 0.0, true));
    set_input(&mut engine, P2, input(1.0, 0.2, 3.0, false));

    for _ in 0..2000 {
        let out = engine.tick(dt());
        assert_in_bounds(&out.snapshot, &params);
    }
}

// ---- Player movement and firing ----

#[test]
fn test_movement_along_aim_is_full_speed() {
    let vel = movement_velocity(&input(1.0, 0.0, 0.0, false));
    assert!((vel.x - PLAYER_SPEED).abs() < 1e-9);
    assert!(vel.y.abs() < 1e-9);
}

#[test]
fn test_backpedal_and_strafe_are_slower() {
    let back = movement_velocity(&input(-1.0, 0.0, 0.0, false));
    assert!((back.speed() - PLAYER_SPEED * 0.4).abs() < 1e-9);

    let strafe = movement_velocity(&input(0.0, 1.0, 0.0, false));
    assert!((strafe.speed() - PLAYER_SPEED * 0.7).abs() < 1e-9);
}

#[test]
fn test_short_move_vector_still_moves_at_full_speed() {
    let vel = movement_velocity(&input(0.1, 0.0, 0.0, false));
    assert!((vel.speed() - PLAYER_SPEED).abs() < 1e-9);
}

#[test]
fn test_idle_input_stops_player() {
    assert_eq!(movement_velocity(&input(0.0, 0.0, 1.0, false)).speed(), 0.0);
}

#[test]
fn test_muzzle_offset() {
    let muzzle = muzzle_position(&Position::new(100.0, 100.0), 0.0);
    assert!((muzzle.x - 125.0).abs() < 1e-9);
    assert!((muzzle.y - 110.0).abs() < 1e-9);
}

#[test]
fn test_fire_ready_gate() {
    assert!(fire_ready(None, 0.0));
    assert!(!fire_ready(Some(100.0), 100.0 + FIRE_COOLDOWN_MS - 1.0));
    assert!(fire_ready(Some(100.0), 100.0 + FIRE_COOLDOWN_MS));
}

#[test]
fn test_player_moves_and_turns() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(1.0, 0.0, 0.25, false));
    let out = engine.tick(Duration::from_millis(100));

    let player = &out.snapshot.players[&P1];
    assert!(player.position.x > engine.params().center().x);
    assert!((player.aim_angle - 0.25).abs() < 1e-12);
    assert!(player.velocity.speed() > 0.0);
}

#[test]
fn test_non_finite_aim_keeps_previous() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 1.0, false));
    engine.tick(dt());
    set_input(&mut engine, P1, input(f64::NAN, 0.0, f64::NAN, false));
    let out = engine.tick(dt());

    let player = &out.snapshot.players[&P1];
    assert!((player.aim_angle - 1.0).abs() < 1e-12);
    assert_eq!(player.position, engine.params().center());
}

#[test]
fn test_latest_input_wins() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(1.0, 0.0, 0.0, true));
    set_input(&mut engine, P1, input(0.0, 0.0, 2.0, false));
    let out = engine.tick(dt());

    assert!(out.events.is_empty(), "overwritten trigger must not fire");
    assert!((out.snapshot.players[&P1].aim_angle - 2.0).abs() < 1e-12);
}

#[test]
fn test_fire_cooldown_respected() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));

    let mut shot_times = Vec::new();
    // Jittered deltas stand in for an uneven wall clock.
    for i in 0..600 {
        let step = if i % 3 == 0 { 5 } else { 23 };
        let out = engine.tick(Duration::from_millis(step));
        for event in out.events {
            if let GameEvent::ShotFired { player, .. } = event {
                assert_eq!(player, P1);
                shot_times.push(engine.time().elapsed_ms);
            }
        }
    }

    assert!(shot_times.len() > 10);
    for pair in shot_times.windows(2) {
        assert!(
            pair[1] - pair[0] >= FIRE_COOLDOWN_MS,
            "shots {} ms apart",
            pair[1] - pair[0]
        );
    }
}

#[test]
fn test_shot_event_carries_muzzle() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));
    let out = engine.tick(dt());

    let center = engine.params().center();
    assert_eq!(
        out.events,
        vec![GameEvent::ShotFired {
            player: P1,
            position: muzzle_position(&center, 0.0),
            angle: 0.0,
        }]
    );
    assert_eq!(out.snapshot.bullets.len(), 1);
    assert_eq!(out.snapshot.bullets[0].owner_id, P1);
    assert!((out.snapshot.bullets[0].velocity.x - BULLET_SPEED).abs() < 1e-9);
}

// ---- Bullets ----

#[test]
fn test_bullet_expires_within_lifetime() {
    // A large world keeps the bullet in bounds for its whole life.
    let mut engine = SimulationEngine::with_layout(
        SimConfig {
            seed: Some(1),
            mob_count: 0,
            generation: GenerationParams {
                width: 10_000.0,
                height: 10_000.0,
                ..Default::default()
            },
            ..Default::default()
        },
        WorldLayout::default(),
    );
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));
    engine.tick(dt());
    let fired_at = engine.time().elapsed_ms;
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, false));

    let mut removed_at = None;
    for _ in 0..400 {
        let out = engine.tick(dt());
        let age = engine.time().elapsed_ms - fired_at;
        if out.snapshot.bullets.is_empty() {
            removed_at = Some(age);
            break;
        }
        assert!(age < BULLET_LIFETIME_MS, "bullet still alive at {age} ms");
    }

    let age = removed_at.expect("bullet never expired");
    assert!(age >= BULLET_LIFETIME_MS);
    assert!(age < BULLET_LIFETIME_MS + TICK_INTERVAL_MS + 1e-6);
}

#[test]
fn test_bullet_leaving_world_is_removed() {
    let mut engine = engine_with_walls(Vec::new(), 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));
    engine.tick(dt());
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, false));

    // 1500 units at 900 u/s is well under two seconds.
    for _ in 0..120 {
        engine.tick(dt());
    }
    assert_eq!(engine.registry().bullet_count(), 0);
}

#[test]
fn test_bullet_stops_at_wall() {
    let wall = Rect::new(1600.0, 1400.0, 100.0, 200.0);
    let mut engine = engine_with_walls(vec![wall], 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));
    engine.tick(dt());
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, false));

    for _ in 0..10 {
        let out = engine.tick(dt());
        for bullet in &out.snapshot.bullets {
            assert!(bullet.position.x < wall.x);
        }
    }
    assert_eq!(engine.registry().bullet_count(), 0);
}

#[test]
fn test_bullet_cannot_skip_thin_wall_on_long_tick() {
    // A 250 ms step carries a bullet 225 units, further than this wall is thick.
    let wall = Rect::new(1560.0, 1400.0, 60.0, 200.0);
    let long_tick = Duration::from_millis(250);
    let mut engine = engine_with_walls(vec![wall], 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));
    let first = engine.tick(long_tick);
    assert!(first
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShotFired { .. })));
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, false));

    for _ in 0..4 {
        let out = engine.tick(long_tick);
        for bullet in &out.snapshot.bullets {
            assert!(bullet.position.x < wall.x, "bullet passed wall at x={}", bullet.position.x);
        }
    }
    for bullet in &first.snapshot.bullets {
        assert!(bullet.position.x < wall.x);
    }
    assert_eq!(engine.registry().bullet_count(), 0);
}

// ---- Walls ----

#[test]
fn test_player_cannot_walk_through_wall() {
    let wall = Rect::new(1600.0, 1400.0, 100.0, 200.0);
    let mut engine = engine_with_walls(vec![wall], 0);
    join(&mut engine, P1);
    set_input(&mut engine, P1, input(1.0, 0.0, 0.0, false));

    for _ in 0..200 {
        let out = engine.tick(dt());
        let pos = out.snapshot.players[&P1].position;
        assert!(pos.x <= wall.x - PLAYER_RADIUS + 1e-6, "player entered wall at x={}", pos.x);
    }
}

#[test]
fn test_wandering_mob_bounces_off_wall() {
    let wall = Rect::new(1000.0, 1000.0, 200.0, 200.0);
    let mut engine = engine_with_walls(vec![wall], 1);
    place_mob(&mut engine, MobId(0), Position::new(wall.x - MOB_RADIUS, 1100.0));
    {
        let entity = engine.registry().mob_entity(MobId(0)).unwrap();
        let mut brain = engine
            .registry_mut()
            .world_mut()
            .get::<&mut MobBrain>(entity)
            .unwrap();
        brain.direction = DVec2::X;
        brain.direction_timer_ms = 0.0;
    }

    let out = engine.tick(dt());
    let brain = &mob_brains(&engine)[0];
    assert_eq!(brain.direction, -DVec2::X);
    assert!(out.snapshot.mobs[0].position.x <= wall.x - MOB_RADIUS + 1e-6);
}

// ---- Mob population ----

#[test]
fn test_mob_population_invariant() {
    let mut engine = engine_with_walls(Vec::new(), MOB_COUNT);
    join(&mut engine, P1);
    let center = engine.params().center();
    // Park a mob in the line of fire.
    place_mob(&mut engine, MobId(0), Position::new(center.x + 100.0, center.y + 10.0));
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));

    let mut deaths = 0;
    let mut hits = 0;
    for _ in 0..600 {
        let out = engine.tick(dt());
        assert_eq!(out.snapshot.mobs.len(), MOB_COUNT);
        assert_eq!(engine.registry().mob_count(), MOB_COUNT);
        for event in &out.events {
            match event {
                GameEvent::MobDied { .. } => deaths += 1,
                GameEvent::MobHit { .. } => hits += 1,
                _ => {}
            }
        }
    }
    assert!(deaths >= 1, "no mob died");
    assert!(hits >= (MOB_HP as usize - 1));

    // Respawned mobs take fresh ids.
    let snap = engine.snapshot();
    assert!(snap.mobs.iter().all(|m| m.alive && m.hp > 0));
    assert!(snap.mobs.iter().any(|m| m.id.0 >= MOB_COUNT as u64));
}

#[test]
fn test_bullet_damages_one_mob_by_one_hp() {
    let mut engine = engine_with_walls(Vec::new(), 2);
    join(&mut engine, P1);
    let center = engine.params().center();
    // Two stacked mobs in the line of fire; only the lower id absorbs the shot.
    place_mob(&mut engine, MobId(0), Position::new(center.x + 45.0, center.y + 10.0));
    place_mob(&mut engine, MobId(1), Position::new(center.x + 45.0, center.y + 10.0));
    set_input(&mut engine, P1, input(0.0, 0.0, 0.0, true));

    let out = engine.tick(dt());
    let hits: Vec<_> = out
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::MobHit { mob, .. } => Some(*mob),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![MobId(0)]);
    assert_eq!(out.snapshot.mobs[0].hp, MOB_HP - BULLET_DAMAGE);
    assert_eq!(out.snapshot.mobs[1].hp, MOB_HP);
    assert!(out.snapshot.bullets.is_empty());
}

// ---- Mob AI ----

#[test]
fn test_mob_aggroes_nearby_player() {
    let mut engine = engine_with_walls(Vec::new(), 1);
    join(&mut engine, P1);
    let center = engine.params().center();
    place_mob(&mut engine, MobId(0), Position::new(center.x + 200.0, center.y));

    engine.tick(dt());
    let brain = &mob_brains(&engine)[0];
    assert_eq!(brain.state(), MobState::Aggroed);
    assert_eq!(brain.target(), Some(P1));
}

#[test]
fn test_mob_ignores_distant_player() {
    let mut engine = engine_with_walls(Vec::new(), 1);
    join(&mut engine, P1);
    let center = engine.params().center();
    place_mob(&mut engine, MobId(0), Position::new(center.x + 800.0, center.y));

    engine.tick(dt());
    assert_eq!(mob_brains(&engine)[0].state(), MobState::Wandering);
}

#[test]
fn test_mob_attack_cooldown() {
    let mut engine = engine_with_walls(Vec::new(), 1);
    join(&mut engine, P1);
    let center = engine.params().center();
    place_mob(&mut engine, MobId(0), Position::new(center.x + 20.0, center.y));

    let mut attack_times = Vec::new();
    let mut last_hp = PLAYER_MAX_HP;
    for _ in 0..300 {
        let out = engine.tick(dt());
        let hp = out.snapshot.players[&P1].hp;
        for event in &out.events {
            if let GameEvent::MobAttacked { mob, .. } = event {
                assert_eq!(*mob, MobId(0));
                attack_times.push(engine.time().elapsed_ms);
                let dealt = last_hp - hp;
                assert!((MOB_DAMAGE_MIN..=MOB_DAMAGE_MAX).contains(&dealt));
            }
        }
        last_hp = hp;
    }

    assert!(attack_times.len() >= 4, "only {} attacks", attack_times.len());
    for pair in attack_times.windows(2) {
        assert!(pair[1] - pair[0] >= MOB_ATTACK_COOLDOWN_MS);
    }
}

#[test]
fn test_player_hp_floors_at_zero() {
    let mut engine = engine_with_walls(Vec::new(), 3);
    join(&mut engine, P1);
    engine.queue_command(SimCommand::AggroAll { player: P1 });

    for _ in 0..(60 * 60) {
        engine.tick(dt());
    }
    assert_eq!(player_hp(&engine, P1), 0);
    // Still connected and controllable.
    assert!(engine.registry().contains_player(P1));
}

#[test]
fn test_aggro_all_next_tick() {
    let mut engine = SimulationEngine::new(config(5, MOB_COUNT));
    join(&mut engine, P1);
    engine.queue_command(SimCommand::AggroAll { player: P1 });
    engine.tick(dt());

    let spawn = engine.params().center();
    let brains = mob_brains(&engine);
    assert_eq!(brains.len(), MOB_COUNT);
    for brain in brains {
        let aggro = brain.aggro.expect("mob not aggroed");
        assert_eq!(aggro.player, P1);
        assert_eq!(aggro.position, spawn);
    }
}

#[test]
fn test_aggro_all_unknown_player_is_ignored() {
    let mut engine = SimulationEngine::new(config(5, MOB_COUNT));
    engine.queue_command(SimCommand::AggroAll { player: P2 });
    engine.tick(dt());
    assert!(mob_brains(&engine).iter().all(|b| b.aggro.is_none()));
}

#[test]
fn test_disconnect_releases_mobs_same_tick() {
    let mut engine = SimulationEngine::new(config(8, MOB_COUNT));
    join(&mut engine, P1);
    engine.queue_command(SimCommand::AggroAll { player: P1 });
    engine.tick(dt());
    assert!(mob_brains(&engine).iter().all(|b| b.target() == Some(P1)));

    engine.queue_command(SimCommand::Leave(P1));
    let out = engine.tick(dt());

    assert!(out.snapshot.players.is_empty());
    for brain in mob_brains(&engine) {
        assert_eq!(brain.state(), MobState::Wandering);
        assert!((brain.direction.length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_aggro_is_permanent_while_target_connected() {
    let mut engine = engine_with_walls(Vec::new(), 1);
    join(&mut engine, P1);
    engine.queue_command(SimCommand::AggroAll { player: P1 });
    // Run away at full speed; the mob never gives up.
    set_input(&mut engine, P1, input(-1.0, 0.0, std::f64::consts::PI, false));
    for _ in 0..600 {
        engine.tick(dt());
        assert_eq!(mob_brains(&engine)[0].target(), Some(P1));
    }
}

// ---- Registry ----

#[test]
fn test_registry_remove_player_counts_released_mobs() {
    use rand::SeedableRng;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(4);
    let params = GenerationParams::default();
    let mut registry = EntityRegistry::new(params.center());
    for _ in 0..6 {
        registry.spawn_mob(&params, &[], &mut rng);
    }
    registry.add_player(P1);
    registry.add_player(P2);

    assert_eq!(registry.aggro_all(P1), 6);
    assert_eq!(registry.remove_player(P2, &mut rng), Some(0));
    assert_eq!(registry.remove_player(P1, &mut rng), Some(6));
    assert_eq!(registry.remove_player(P1, &mut rng), None);
}

#[test]
fn test_registry_remove_player_tolerates_missing_entity() {
    use rand::SeedableRng;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(4);
    let mut registry = EntityRegistry::new(Position::new(0.0, 0.0));
    registry.add_player(P1);
    let entity = registry.player_entity(P1).unwrap();
    registry.world_mut().despawn(entity).unwrap();

    assert_eq!(registry.remove_player(P1, &mut rng), Some(0));
    assert!(!registry.contains_player(P1));
    assert_eq!(registry.remove_player(P1, &mut rng), None);
}

#[test]
fn test_registry_despawn_unknown_ids() {
    let mut registry = EntityRegistry::new(Position::new(0.0, 0.0));
    assert!(!registry.despawn_mob(MobId(3)));
    assert!(!registry.despawn_bullet(gloom_core::types::BulletId(3)));
    assert!(!registry.set_input(P1, PlayerInput::default()));
}

#[test]
fn test_registry_bullet_ids_are_monotonic() {
    let mut registry = EntityRegistry::new(Position::new(0.0, 0.0));
    let a = registry.spawn_bullet(P1, Position::new(10.0, 10.0), 0.0, 0.0);
    registry.despawn_bullet(a);
    let b = registry.spawn_bullet(P1, Position::new(10.0, 10.0), 0.0, 0.0);
    assert!(b > a);
    assert_eq!(registry.bullet_count(), 1);
}

#[test]
fn test_registry_sanitizes_input() {
    let mut registry = EntityRegistry::new(Position::new(0.0, 0.0));
    registry.add_player(P1);
    assert!(registry.set_input(P1, input(3.0, 4.0, 0.0, false)));

    let entity = registry.player_entity(P1).unwrap();
    let state = registry
        .world()
        .get::<&gloom_core::components::InputState>(entity)
        .unwrap();
    assert!((state.input.move_dir.x - 0.6).abs() < 1e-12);
    assert!((state.input.move_dir.y - 0.8).abs() < 1e-12);
}
