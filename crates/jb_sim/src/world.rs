//! World orchestration: owns every entity and runs the fixed tick.
//!
//! Tick order is part of the contract (see the crate docs): clock, player,
//! gun pickup, enemies, player projectiles, combat, dead sweep, camera.
//! `step` returns the events produced this tick; the shell drains them as
//! fire-and-forget notifications.

use glam::Vec2;
use jb_core::geom::Rect;
use jb_core::input::InputSnapshot;
use jb_core::tick::TickClock;

use crate::actor::IdAlloc;
use crate::camera::Camera;
use crate::combat;
use crate::enemy::{Enemy, WorldView};
use crate::event::SimEvent;
use crate::level::LevelFile;
use crate::platform::Platform;
use crate::player::{Player, PlayerConfig};
use crate::projectile::Projectile;

pub const GUN_PICKUP_SIZE: f32 = 20.0;

pub struct World {
    pub platforms: Vec<Platform>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    /// Gun pickup, consumed on first overlap.
    pub gun: Option<Rect>,
    pub camera: Camera,
    pub world_width: f32,
    pub world_height: f32,
    pub game_over: bool,
    level: LevelFile,
    clock: TickClock,
    ids: IdAlloc,
    events: Vec<SimEvent>,
}

impl World {
    pub fn from_level(level: &LevelFile, screen: (f32, f32)) -> Self {
        let mut ids = IdAlloc::new();
        let platforms = level.platforms.iter().map(|p| p.build()).collect();
        let enemies = level
            .enemy_spawns
            .iter()
            .map(|s| Enemy::spawn(ids.next(), s.kind, Vec2::new(s.position.0, s.position.1)))
            .collect();
        let player = Player::new(
            Vec2::new(level.player_spawn.0, level.player_spawn.1),
            PlayerConfig::default(),
        );
        let gun = level
            .gun_spawn
            .map(|(x, y)| Rect::new(x, y, GUN_PICKUP_SIZE, GUN_PICKUP_SIZE));

        Self {
            platforms,
            player,
            enemies,
            player_shots: Vec::new(),
            gun,
            camera: Camera::new(screen, (level.world_width, level.world_height)),
            world_width: level.world_width,
            world_height: level.world_height,
            game_over: false,
            level: level.clone(),
            clock: TickClock::new(),
            ids,
            events: Vec::new(),
        }
    }

    /// Rebuilds everything from the retained level. Screen size survives.
    pub fn reset(&mut self) {
        log::info!("resetting world");
        let screen = (self.camera.screen_width, self.camera.screen_height);
        *self = Self::from_level(&self.level.clone(), screen);
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Runs one simulation tick and returns the events it produced. After
    /// the game-over latch trips, stepping is a no-op.
    pub fn step(&mut self, input: &InputSnapshot) -> Vec<SimEvent> {
        if self.game_over {
            return Vec::new();
        }

        self.clock.advance();
        let now_ms = self.clock.now_ms();

        if let Some(request) =
            self.player
                .step(input, now_ms, &mut self.platforms, &mut self.events)
        {
            self.player_shots.push(Projectile::player_shot(
                self.ids.next(),
                request.origin,
                request.direction,
            ));
        }

        if let Some(gun) = self.gun {
            if self.player.alive && self.player.rect.intersects(&gun) {
                self.player.has_gun = true;
                self.gun = None;
                self.events.push(SimEvent::GunPickedUp);
                log::info!("player picked up the gun");
            }
        }

        let view = WorldView {
            player_center: self.player.rect.center(),
            player_alive: self.player.alive,
            platforms: &self.platforms,
            world_width: self.world_width,
            world_height: self.world_height,
        };
        for enemy in &mut self.enemies {
            enemy.step(&view, now_ms, &mut self.ids, &mut self.events);
        }

        for shot in &mut self.player_shots {
            shot.integrate();
        }

        combat::resolve_combat(
            &mut self.player,
            &mut self.enemies,
            &mut self.player_shots,
            &self.platforms,
            self.world_width,
            self.world_height,
            now_ms,
            &mut self.events,
        );

        self.enemies.retain(|e| e.alive);

        self.camera.update(&self.player.rect);

        if !self.player.alive {
            self.game_over = true;
            log::info!("game over at tick {}", self.clock.tick());
        }

        std::mem::take(&mut self.events)
    }
}
