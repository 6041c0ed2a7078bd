//! Headless симуляция врагов
//!
//! Игрок в центре, кольцо врагов вокруг. Через несколько секунд игрок
//! бьёт всех, кто подошёл близко; трупы исчезают по death timer.
//!
//! Usage: aggro_simulation [config.json]

use std::process::ExitCode;

use aggro_simulation::{
    create_headless_app, init_logger, log_error, log_info, spawn_enemy, spawn_player, AggressionConfig,
    DamageReceived, Enemy, HealthState, SimulationPlugin, Targetable, TICK_HZ,
};
use bevy::prelude::*;

const SEED: u64 = 42;
const ENEMY_COUNT: usize = 12;
const SPAWN_RADIUS: f32 = 6.0;
const TICKS: usize = 900;
/// Тик, на котором игрок отвечает ударом
const STRIKE_TICK: usize = 420;
const STRIKE_RANGE: f32 = 3.0;
const STRIKE_DAMAGE: f32 = 25.0;

fn main() -> ExitCode {
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match AggressionConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Invalid config {}: {}", path, err));
                return ExitCode::FAILURE;
            }
        },
        None => AggressionConfig::default(),
    };

    log_info(&format!(
        "Starting headless aggression simulation (seed: {}, enemies: {}, {} Hz)",
        SEED, ENEMY_COUNT, TICK_HZ
    ));

    let mut app = create_headless_app(SEED);
    app.insert_resource(config).add_plugins(SimulationPlugin);

    let player = spawn_player(app.world_mut(), Vec3::ZERO);
    for i in 0..ENEMY_COUNT {
        let angle = i as f32 / ENEMY_COUNT as f32 * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos() * SPAWN_RADIUS, 0.0, angle.sin() * SPAWN_RADIUS);
        spawn_enemy(app.world_mut(), position, Some(player));
    }

    for tick in 0..TICKS {
        app.update();

        if tick == STRIKE_TICK {
            strike_nearby_enemies(app.world_mut(), Vec3::ZERO);
        }

        if tick % 60 == 0 {
            let (alive, dead) = count_enemies(app.world_mut());
            log_info(&format!("Tick {}: {} alive, {} dead", tick, alive, dead));
        }
    }

    let (alive, dead) = count_enemies(app.world_mut());
    log_info(&format!("Simulation complete! {} alive, {} dead awaiting despawn", alive, dead));

    ExitCode::SUCCESS
}

/// Игрок бьёт всех targetable врагов в радиусе STRIKE_RANGE
fn strike_nearby_enemies(world: &mut World, origin: Vec3) {
    let mut query = world.query_filtered::<(Entity, &Transform), (With<Enemy>, With<Targetable>)>();
    let hits: Vec<Entity> = query
        .iter(world)
        .filter(|(_, transform)| transform.translation.distance(origin) <= STRIKE_RANGE)
        .map(|(entity, _)| entity)
        .collect();

    log_info(&format!("Player strikes {} enemies", hits.len()));

    for target in hits {
        world.send_event(DamageReceived {
            target,
            amount: STRIKE_DAMAGE,
            origin,
        });
    }
}

fn count_enemies(world: &mut World) -> (usize, usize) {
    let mut query = world.query::<&Enemy>();
    query.iter(world).fold((0, 0), |(alive, dead), enemy| {
        match enemy.controller.health_state() {
            HealthState::Alive => (alive + 1, dead),
            HealthState::Dead => (alive, dead + 1),
        }
    })
}
