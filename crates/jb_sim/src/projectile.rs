//! Projectiles for both sides of the fight.
//!
//! A projectile is a dumb rect with a constant velocity; all hit logic lives
//! in the combat coordinator. Player shots travel horizontally, enemy shots
//! are aimed once at spawn and never home.

use glam::Vec2;
use jb_core::geom::Rect;

use crate::actor::SourceId;
use crate::platform::Platform;

pub const PLAYER_SHOT_SPEED: f32 = 15.0;
pub const ENEMY_SHOT_SPEED: f32 = 8.0;
pub const PROJECTILE_SIZE: f32 = 8.0;
pub const PROJECTILE_DAMAGE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: SourceId,
    pub rect: Rect,
    pub velocity: Vec2,
    pub damage: i32,
    pub side: Side,
}

impl Projectile {
    /// Horizontal player shot. `direction` is -1.0 or 1.0 from facing.
    pub fn player_shot(id: SourceId, origin: Vec2, direction: f32) -> Self {
        Self {
            id,
            rect: Rect::from_center(origin, PROJECTILE_SIZE, PROJECTILE_SIZE),
            velocity: Vec2::new(direction * PLAYER_SHOT_SPEED, 0.0),
            damage: PROJECTILE_DAMAGE,
            side: Side::Player,
        }
    }

    /// Enemy shot aimed at `target` once, at spawn time.
    pub fn enemy_shot(id: SourceId, origin: Vec2, target: Vec2) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec2::X);
        Self {
            id,
            rect: Rect::from_center(origin, PROJECTILE_SIZE, PROJECTILE_SIZE),
            velocity: dir * ENEMY_SHOT_SPEED,
            damage: PROJECTILE_DAMAGE,
            side: Side::Enemy,
        }
    }

    pub fn integrate(&mut self) {
        self.rect = self.rect.translate(self.velocity);
    }

    /// Hits any platform kind that stops shots. Ladders do not.
    pub fn hits_platform(&self, platforms: &[Platform]) -> bool {
        platforms
            .iter()
            .any(|p| p.kind.blocks_projectiles() && self.rect.intersects(&p.rect))
    }

    pub fn off_world(&self, world_width: f32, world_height: f32) -> bool {
        self.rect.right() < 0.0
            || self.rect.left() > world_width
            || self.rect.bottom() < 0.0
            || self.rect.top() > world_height
    }
}
