//! junebug -- headless simulation runner.
//!
//! Loads a level (argument or the built-in arena), optionally an input
//! script, then runs the fixed-tick world and reports every simulation
//! event through the logger. Useful for replaying bug reports and for
//! watching a level's combat balance without a renderer attached.
//!
//! Usage: `jb_game [LEVEL_JSON] [SCRIPT_JSON]`

mod script;

use std::path::Path;

use jb_core::input::InputSnapshot;
use jb_sim::event::SimEvent;
use jb_sim::level::{self, LevelFile};
use jb_sim::world::World;
use script::{load_script_from_path, parse_script, ScriptFile};

const SCREEN_WIDTH: f32 = 800.0;
const SCREEN_HEIGHT: f32 = 600.0;
/// Ticks to keep running after the script is exhausted (lets jumps land
/// and projectiles resolve).
const TAIL_TICKS: usize = 120;

const DEFAULT_LEVEL: &str = r#"{
    "world_width": 1600.0,
    "world_height": 1200.0,
    "player_spawn": [100.0, 900.0],
    "gun_spawn": [180.0, 930.0],
    "platforms": [
        {"type": "Solid", "x": 0.0, "y": 950.0, "width": 700.0, "height": 30.0},
        {"type": "Slippery", "x": 700.0, "y": 950.0, "width": 300.0, "height": 30.0},
        {"type": "Hazard", "x": 1000.0, "y": 950.0, "width": 100.0, "height": 30.0},
        {"type": "Ladder", "x": 400.0, "y": 750.0, "width": 40.0, "height": 200.0},
        {"type": "Solid", "x": 440.0, "y": 750.0, "width": 300.0, "height": 20.0},
        {"type": "Teleporter", "x": 20.0, "y": 930.0, "width": 40.0, "height": 20.0, "pair_id": 1},
        {"type": "Teleporter", "x": 1200.0, "y": 930.0, "width": 40.0, "height": 20.0, "pair_id": 1},
        {"type": "Solid", "x": 1100.0, "y": 950.0, "width": 500.0, "height": 30.0}
    ],
    "enemy_spawns": [
        {"type": "Ground", "position": [500.0, 920.0]},
        {"type": "Tank", "position": [1300.0, 910.0]},
        {"type": "Shooter", "position": [600.0, 720.0]},
        {"type": "Flying", "position": [800.0, 700.0]}
    ]
}"#;

const DEFAULT_SCRIPT: &str = r#"{
    "frames": [
        {"move_x": 1.0, "repeat": 60},
        {"move_x": 1.0, "jump": true, "repeat": 10},
        {"fire": true, "repeat": 150},
        {"move_x": -1.0, "repeat": 150}
    ]
}"#;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();

    let level: LevelFile = match args.get(1) {
        Some(path) => level::load_level_from_path(Path::new(path))?,
        None => {
            log::info!("no level given, using the built-in arena");
            level::parse_level(DEFAULT_LEVEL)?
        }
    };
    let script: ScriptFile = match args.get(2) {
        Some(path) => load_script_from_path(Path::new(path))?,
        None => parse_script(DEFAULT_SCRIPT)?,
    };

    let mut world = World::from_level(&level, (SCREEN_WIDTH, SCREEN_HEIGHT));
    let inputs = script.expanded_inputs();
    let total_ticks = inputs.len() + TAIL_TICKS;
    log::info!(
        "running {} scripted ticks plus {} tail ticks",
        inputs.len(),
        TAIL_TICKS
    );

    let idle = InputSnapshot::default();
    let mut event_count = 0usize;
    for tick in 0..total_ticks {
        let input = inputs.get(tick).unwrap_or(&idle);
        for event in world.step(input) {
            event_count += 1;
            report(&world, event);
        }
        if world.game_over {
            break;
        }
    }

    log::info!(
        "run finished at t={}ms: player hp {} at ({:.0}, {:.0}), {} enemies alive, {} events",
        world.now_ms(),
        world.player.health,
        world.player.rect.x,
        world.player.rect.y,
        world.enemies.len(),
        event_count
    );
    Ok(())
}

fn report(world: &World, event: SimEvent) {
    let t = world.now_ms();
    match event {
        SimEvent::PlayerFired => log::debug!("[{t}ms] player fired"),
        SimEvent::PlayerDamaged { amount } => {
            log::info!(
                "[{t}ms] player took {amount} damage, {} hp left",
                world.player.health
            )
        }
        SimEvent::PlayerDied => log::warn!("[{t}ms] player died"),
        SimEvent::GunPickedUp => log::info!("[{t}ms] gun picked up"),
        SimEvent::Teleported => log::info!("[{t}ms] teleported"),
        SimEvent::EnemyFired { kind } => log::debug!("[{t}ms] {kind:?} enemy fired"),
        SimEvent::EnemyDamaged { kind, amount } => {
            log::debug!("[{t}ms] {kind:?} enemy took {amount} damage")
        }
        SimEvent::EnemyKilled { kind } => log::info!("[{t}ms] {kind:?} enemy killed"),
    }
}
