//! Enemy AI variants.
//!
//! One closed [`EnemyKind`] dispatched by `match`; behavior differences live
//! in [`EnemyConfig::for_kind`] plus the per-kind movement arm. All kinds
//! share the same tick shape: gravity, penetration resolution (ladders
//! transparent), then the movement arm picks a velocity and integrates.
//! Contact damage is NOT applied here; the combat coordinator owns every
//! health mutation and consumes [`Enemy::damage_cooldown`].

use glam::Vec2;
use serde::Deserialize;

use jb_core::geom::{move_towards, Rect};
use jb_core::tick::Cooldown;

use crate::actor::{IdAlloc, SourceId};
use crate::collision::{self, ResolveOptions};
use crate::event::SimEvent;
use crate::platform::Platform;
use crate::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EnemyKind {
    Ground,
    Flying,
    Shooter,
    Tank,
}

#[derive(Debug, Clone)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub acceleration: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub vision_range: f32,
    pub contact_damage: i32,
    pub damage_cooldown_ms: u64,
    pub invuln_duration_ms: u64,
    // Flying only.
    pub hover_speed: f32,
    pub orbit_radius: f32,
    pub dive_cooldown_ms: u64,
    pub dive_exit_distance: f32,
    pub idle_radius: f32,
    // Shooter only.
    pub shoot_range: f32,
    pub shoot_cooldown_ms: u64,
}

impl EnemyConfig {
    pub fn for_kind(kind: EnemyKind) -> Self {
        let base = Self {
            width: 30.0,
            height: 30.0,
            max_health: 50,
            patrol_speed: 1.0,
            chase_speed: 2.0,
            acceleration: 0.2,
            gravity: 0.8,
            max_fall_speed: 10.0,
            vision_range: 300.0,
            contact_damage: 10,
            damage_cooldown_ms: 500,
            invuln_duration_ms: 500,
            hover_speed: 2.0,
            orbit_radius: 100.0,
            dive_cooldown_ms: 2000,
            dive_exit_distance: 10.0,
            idle_radius: 5.0,
            shoot_range: 400.0,
            shoot_cooldown_ms: 1000,
        };
        match kind {
            EnemyKind::Ground => base,
            EnemyKind::Flying => Self {
                gravity: 0.0,
                chase_speed: 4.0,
                ..base
            },
            EnemyKind::Shooter => Self {
                max_health: 30,
                ..base
            },
            EnemyKind::Tank => Self {
                max_health: 200,
                width: 40.0,
                height: 40.0,
                acceleration: 0.1,
                ..base
            },
        }
    }
}

/// Read-only slice of world state an enemy is allowed to see.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    pub player_center: Vec2,
    pub player_alive: bool,
    pub platforms: &'a [Platform],
    pub world_width: f32,
    pub world_height: f32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: SourceId,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub velocity: Vec2,
    pub health: i32,
    pub alive: bool,
    pub on_ground: bool,
    patrol_direction: f32,
    spawn_center: Vec2,
    diving: bool,
    dive_cooldown: Cooldown,
    shoot_cooldown: Cooldown,
    /// Consumed by the combat coordinator on contact hits.
    pub damage_cooldown: Cooldown,
    invuln_until_ms: u64,
    pub projectiles: Vec<Projectile>,
    pub config: EnemyConfig,
}

impl Enemy {
    /// Spawns at a top-left position, matching level authoring coordinates.
    pub fn spawn(id: SourceId, kind: EnemyKind, top_left: Vec2) -> Self {
        let config = EnemyConfig::for_kind(kind);
        let rect = Rect::new(top_left.x, top_left.y, config.width, config.height);
        Self {
            id,
            kind,
            rect,
            velocity: Vec2::ZERO,
            health: config.max_health,
            alive: true,
            on_ground: false,
            patrol_direction: 1.0,
            spawn_center: rect.center(),
            diving: false,
            dive_cooldown: Cooldown::new(config.dive_cooldown_ms),
            shoot_cooldown: Cooldown::new(config.shoot_cooldown_ms),
            damage_cooldown: Cooldown::new(config.damage_cooldown_ms),
            invuln_until_ms: 0,
            projectiles: Vec::new(),
            config,
        }
    }

    pub fn step(
        &mut self,
        view: &WorldView<'_>,
        now_ms: u64,
        ids: &mut IdAlloc,
        events: &mut Vec<SimEvent>,
    ) {
        if !self.alive {
            return;
        }

        self.velocity.y =
            (self.velocity.y + self.config.gravity).min(self.config.max_fall_speed);

        // Resolution runs against the pre-move rect: the integration below
        // acts on the corrected position and velocity.
        let outcome = collision::resolve(
            self.rect,
            self.velocity,
            view.platforms,
            ResolveOptions {
                down_held: false,
                ignore_ladders: true,
            },
        );
        self.rect = outcome.rect;
        self.velocity = outcome.velocity;
        self.on_ground = outcome.on_ground;
        if outcome.blocked_left || outcome.blocked_right {
            self.patrol_direction = -self.patrol_direction;
        }

        match self.kind {
            EnemyKind::Ground | EnemyKind::Tank => self.move_grounded(view),
            EnemyKind::Flying => self.move_flying(view, now_ms),
            EnemyKind::Shooter => self.move_shooter(view, now_ms, ids, events),
        }

        self.update_projectiles(view);
    }

    fn move_grounded(&mut self, view: &WorldView<'_>) {
        let target = self.horizontal_target(view);
        self.velocity.x = move_towards(self.velocity.x, target, self.config.acceleration);
        if self.on_ground {
            self.rect.x += self.velocity.x;
        }
        self.rect.y += self.velocity.y;
    }

    fn move_flying(&mut self, view: &WorldView<'_>, now_ms: u64) {
        if self.detects_player(view) {
            let to_player = view.player_center - self.rect.center();
            let distance = to_player.length();

            if self.dive_cooldown.try_fire(now_ms) {
                self.diving = true;
            }

            if self.diving {
                if distance > self.config.dive_exit_distance {
                    self.velocity = to_player / distance * self.config.chase_speed;
                } else {
                    self.diving = false;
                }
            } else if distance > self.config.orbit_radius {
                self.velocity = to_player / distance * self.config.hover_speed;
            } else {
                // Strafe perpendicular to the player to circle at radius.
                let orbit = Vec2::new(-to_player.y, to_player.x).normalize_or_zero();
                self.velocity = orbit * self.config.hover_speed;
            }
        } else {
            let home = self.spawn_center - self.rect.center();
            let distance = home.length();
            if distance > self.config.idle_radius {
                self.velocity = home / distance * self.config.hover_speed;
            } else {
                self.velocity = Vec2::ZERO;
            }
        }

        self.rect.x += self.velocity.x;
        self.rect.y += self.velocity.y;
    }

    fn move_shooter(
        &mut self,
        view: &WorldView<'_>,
        now_ms: u64,
        ids: &mut IdAlloc,
        events: &mut Vec<SimEvent>,
    ) {
        if self.detects_player(view) {
            let to_player = view.player_center - self.rect.center();
            if to_player.length() <= self.config.shoot_range {
                self.velocity.x = 0.0;
                if self.shoot_cooldown.try_fire(now_ms) {
                    let shot =
                        Projectile::enemy_shot(ids.next(), self.rect.center(), view.player_center);
                    log::debug!(
                        "shooter at ({:.0}, {:.0}) fired at player",
                        self.rect.x,
                        self.rect.y
                    );
                    self.projectiles.push(shot);
                    events.push(SimEvent::EnemyFired { kind: self.kind });
                }
            } else {
                let target = self.config.chase_speed * to_player.x.signum();
                self.velocity.x =
                    move_towards(self.velocity.x, target, self.config.acceleration);
            }
        } else {
            if self.at_ledge(view) {
                self.patrol_direction = -self.patrol_direction;
            }
            let target = self.config.patrol_speed * self.patrol_direction;
            self.velocity.x = move_towards(self.velocity.x, target, self.config.acceleration);
        }

        if self.on_ground {
            self.rect.x += self.velocity.x;
        }
        self.rect.y += self.velocity.y;
    }

    fn horizontal_target(&mut self, view: &WorldView<'_>) -> f32 {
        if self.detects_player(view) {
            let dx = view.player_center.x - self.rect.center().x;
            self.config.chase_speed * dx.signum()
        } else {
            if self.at_ledge(view) {
                self.patrol_direction = -self.patrol_direction;
            }
            self.config.patrol_speed * self.patrol_direction
        }
    }

    fn detects_player(&self, view: &WorldView<'_>) -> bool {
        view.player_alive
            && (view.player_center - self.rect.center()).length() <= self.config.vision_range
    }

    /// Probes one patrol step ahead and slightly down; no supporting platform
    /// there means the next step would walk off the edge.
    fn at_ledge(&self, view: &WorldView<'_>) -> bool {
        let probe = self.rect.translate(Vec2::new(
            self.patrol_direction * self.config.patrol_speed,
            5.0,
        ));
        !view
            .platforms
            .iter()
            .any(|p| !p.kind.climbable() && probe.intersects(&p.rect))
    }

    fn update_projectiles(&mut self, view: &WorldView<'_>) {
        let platforms = view.platforms;
        let (w, h) = (view.world_width, view.world_height);
        self.projectiles.retain_mut(|shot| {
            shot.integrate();
            !shot.hits_platform(platforms) && !shot.off_world(w, h)
        });
    }

    /// Single invulnerability window shared across all damage sources, unlike
    /// the player's per-source table.
    pub fn take_damage(&mut self, amount: i32, now_ms: u64, events: &mut Vec<SimEvent>) {
        if !self.alive || now_ms < self.invuln_until_ms {
            return;
        }
        self.health -= amount;
        self.invuln_until_ms = now_ms + self.config.invuln_duration_ms;
        events.push(SimEvent::EnemyDamaged {
            kind: self.kind,
            amount,
        });
        log::debug!(
            "{:?} enemy took {} damage, {} hp left",
            self.kind,
            amount,
            self.health
        );
        if self.health <= 0 {
            self.alive = false;
            events.push(SimEvent::EnemyKilled { kind: self.kind });
        }
    }
}
