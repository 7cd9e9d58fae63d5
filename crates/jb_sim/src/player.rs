//! Player motion controller.
//!
//! One `step` per tick: input is applied to velocity, velocity is integrated,
//! then the platform phase runs (teleport check, ladder attach/detach,
//! penetration resolution, surface side effects). The externally visible
//! motion state is derived from flags after the fact, never stored as an
//! enum, so it cannot drift out of sync with the physics.

use glam::Vec2;
use jb_core::geom::Rect;
use jb_core::input::InputSnapshot;
use jb_core::tick::Cooldown;

use crate::actor::{Facing, InvulnTable, SourceId};
use crate::collision::{self, ResolveOptions};
use crate::event::SimEvent;
use crate::platform::{self, Platform, PlatformKind};

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub acceleration: f32,
    pub slippery_acceleration: f32,
    pub max_speed: f32,
    pub slippery_max_speed: f32,
    /// Negative: jumps move toward the top of the world.
    pub jump_power: f32,
    /// Jump strength multiplier when launching off a ladder top.
    pub sticky_jump_factor: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub climb_speed: f32,
    /// Bottom-within-this of the ladder top counts as standing at the top.
    pub ladder_top_threshold: f32,
    pub jump_cooldown_ms: u64,
    pub fire_cooldown_ms: u64,
    pub invuln_duration_ms: u64,
    pub max_health: i32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.1,
            slippery_acceleration: 0.9,
            max_speed: 5.0,
            slippery_max_speed: 15.0,
            jump_power: -13.0,
            sticky_jump_factor: 0.3,
            gravity: 0.8,
            max_fall_speed: 10.0,
            climb_speed: 5.0,
            ladder_top_threshold: 5.0,
            jump_cooldown_ms: 300,
            fire_cooldown_ms: 200,
            invuln_duration_ms: 1000,
            max_health: 100,
            width: 24.0,
            height: 40.0,
        }
    }
}

/// Motion state derived from the physics flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Grounded,
    Airborne,
    Climbing,
    AtLadderTop,
    Dead,
}

/// A fire request handed back to the world, which owns projectile ids.
#[derive(Debug, Clone, Copy)]
pub struct ShotRequest {
    pub origin: Vec2,
    pub direction: f32,
}

const SHOT_MUZZLE_OFFSET: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    pub health: i32,
    pub alive: bool,
    pub has_gun: bool,
    /// Kind of platform underfoot this tick, drives friction behavior.
    /// Re-derived from contacts every platform phase; airborne it is `None`.
    pub surface: Option<PlatformKind>,
    pub in_ladder: bool,
    /// Rect of the ladder currently grabbed. Platforms never move, so the
    /// copy stays valid for the whole climb.
    current_ladder: Option<Rect>,
    pub at_ladder_top: bool,
    invuln: InvulnTable,
    jump_cooldown: Cooldown,
    fire_cooldown: Cooldown,
    pub config: PlayerConfig,
}

impl Player {
    pub fn new(spawn_center: Vec2, config: PlayerConfig) -> Self {
        Self {
            rect: Rect::from_center(spawn_center, config.width, config.height),
            velocity: Vec2::ZERO,
            on_ground: false,
            facing: Facing::Right,
            health: config.max_health,
            alive: true,
            has_gun: false,
            surface: None,
            in_ladder: false,
            current_ladder: None,
            at_ladder_top: false,
            invuln: InvulnTable::new(config.invuln_duration_ms),
            jump_cooldown: Cooldown::new(config.jump_cooldown_ms),
            fire_cooldown: Cooldown::new(config.fire_cooldown_ms),
            config,
        }
    }

    pub fn state(&self) -> PlayerState {
        if !self.alive {
            PlayerState::Dead
        } else if self.in_ladder && !self.at_ladder_top {
            PlayerState::Climbing
        } else if self.at_ladder_top {
            PlayerState::AtLadderTop
        } else if self.on_ground {
            PlayerState::Grounded
        } else {
            PlayerState::Airborne
        }
    }

    pub fn is_invulnerable_to(&self, source: SourceId, now_ms: u64) -> bool {
        self.invuln.is_invulnerable_to(source, now_ms)
    }

    /// Runs one tick of player motion. Returns a fire request when the
    /// trigger lands this tick; the world turns it into a projectile.
    pub fn step(
        &mut self,
        input: &InputSnapshot,
        now_ms: u64,
        platforms: &mut [Platform],
        events: &mut Vec<SimEvent>,
    ) -> Option<ShotRequest> {
        if !self.alive {
            return None;
        }
        self.invuln.expire(now_ms);

        let mut shot = None;
        if input.fire_held && self.has_gun && self.fire_cooldown.try_fire(now_ms) {
            let sign = self.facing.sign();
            shot = Some(ShotRequest {
                origin: self.rect.center() + Vec2::new(sign * SHOT_MUZZLE_OFFSET, 0.0),
                direction: sign,
            });
            events.push(SimEvent::PlayerFired);
        }

        if input.jump_held
            && (self.at_ladder_top || (self.in_ladder && self.on_ground))
            && self.jump_cooldown.try_fire(now_ms)
        {
            // Ladder launch. A cooldown-blocked press must NOT dismount.
            let factor = if self.at_ladder_top {
                self.config.sticky_jump_factor
            } else {
                1.0
            };
            self.velocity.y = self.config.jump_power * factor;
            self.on_ground = false;
            self.leave_ladder();
        }

        if self.in_ladder {
            self.climb(input);
        } else {
            if input.jump_held && self.on_ground && self.jump_cooldown.try_fire(now_ms) {
                self.velocity.y = self.config.jump_power;
                self.on_ground = false;
            }
            self.accelerate(input.move_x);
        }

        if input.move_x < 0.0 {
            self.facing = Facing::Left;
        } else if input.move_x > 0.0 {
            self.facing = Facing::Right;
        }

        // Gravity still applies on a ladder while moving downward, so a
        // player who grabs a ladder mid-fall keeps falling until a climb
        // key zeroes the velocity.
        if !self.in_ladder || self.velocity.y > 0.0 {
            self.velocity.y =
                (self.velocity.y + self.config.gravity).min(self.config.max_fall_speed);
        }

        self.rect.x += self.velocity.x;
        if !self.in_ladder || self.velocity.y > 0.0 {
            self.rect.y += self.velocity.y;
        }
        if input.move_x == 0.0 && self.surface != Some(PlatformKind::Slippery) {
            self.velocity.x = 0.0;
        }

        self.platform_phase(input, now_ms, platforms, events);
        shot
    }

    fn accelerate(&mut self, move_x: f32) {
        let slippery = self.surface == Some(PlatformKind::Slippery);
        let (accel, max) = if slippery {
            (self.config.slippery_acceleration, self.config.slippery_max_speed)
        } else {
            (self.config.acceleration, self.config.max_speed)
        };
        if move_x == 0.0 {
            return;
        }
        // On grippy ground a reversal starts from a standstill; on ice the
        // momentum has to be fought down first.
        if !slippery && self.velocity.x * move_x < 0.0 {
            self.velocity.x = 0.0;
        }
        self.velocity.x = (self.velocity.x + accel * move_x).clamp(-max, max);
    }

    fn climb(&mut self, input: &InputSnapshot) {
        let Some(ladder_rect) = self.current_ladder else {
            return;
        };
        if input.up_held {
            let new_top = self.rect.y - self.config.climb_speed;
            // Never climb above the ladder; the top threshold flips the flag.
            if new_top + self.rect.h > ladder_rect.top() {
                self.rect.y = new_top;
            }
            self.velocity.y = 0.0;
            self.at_ladder_top =
                self.rect.bottom() <= ladder_rect.top() + self.config.ladder_top_threshold;
        } else if input.down_held {
            self.at_ladder_top = false;
            let new_top = self.rect.y + self.config.climb_speed;
            if new_top < ladder_rect.bottom() {
                self.rect.y = new_top;
            }
            self.velocity.y = 0.0;
        }
        self.velocity.x = input.move_x * self.config.max_speed;
    }

    fn platform_phase(
        &mut self,
        input: &InputSnapshot,
        now_ms: u64,
        platforms: &mut [Platform],
        events: &mut Vec<SimEvent>,
    ) {
        // The surface tag only lives for one tick; the ladder scan and the
        // contact flags below re-derive it. An airborne tick leaves it
        // `None`, so ice handling never carries into the air.
        self.surface = None;

        // Teleporters win over everything else and end the tick early.
        let entered = platforms
            .iter()
            .position(|p| p.kind.teleporting() && self.rect.intersects(&p.rect));
        if let Some(entered) = entered {
            if platform::try_teleport(
                &mut self.rect,
                &mut self.velocity,
                entered,
                platforms,
                now_ms,
                events,
            ) {
                self.on_ground = false;
                self.leave_ladder();
                return;
            }
        }

        let outcome = collision::resolve(
            self.rect,
            self.velocity,
            platforms,
            ResolveOptions {
                down_held: input.down_held,
                // While climbing the ladder is pure rail, not terrain; its
                // landing case only applies when falling onto it from outside.
                ignore_ladders: self.in_ladder,
            },
        );
        self.rect = outcome.rect;
        self.velocity = outcome.velocity;
        self.on_ground = outcome.on_ground;

        let overlapping_ladder = platforms
            .iter()
            .position(|p| p.kind.climbable() && self.rect.intersects(&p.rect));
        match overlapping_ladder {
            Some(idx) => {
                if !self.in_ladder {
                    // Snap onto the rail when grabbing on.
                    self.rect.set_center_x(platforms[idx].rect.center().x);
                }
                self.in_ladder = true;
                self.current_ladder = Some(platforms[idx].rect);
                self.surface = Some(PlatformKind::Ladder);
            }
            None => self.leave_ladder(),
        }
        // Standing on a ladder top leaves the rect clear of the ladder, so
        // the scan above drops the flag; the resolver's verdict wins.
        if outcome.ladder_top {
            self.at_ladder_top = true;
        }

        if !self.in_ladder {
            if outcome.touched_hazard {
                self.health = 0;
                self.alive = false;
                events.push(SimEvent::PlayerDied);
                log::info!("player touched a hazard");
            } else if outcome.touched_slippery {
                self.surface = Some(PlatformKind::Slippery);
            } else if outcome.touched_solid {
                self.surface = Some(PlatformKind::Solid);
            }
        }
    }

    fn leave_ladder(&mut self) {
        self.in_ladder = false;
        self.current_ladder = None;
        self.at_ladder_top = false;
    }

    /// Applies damage unless this source is inside its invulnerability
    /// window. Sources are independent: two enemies can both land hits in
    /// the same window.
    pub fn take_damage(
        &mut self,
        amount: i32,
        source: SourceId,
        now_ms: u64,
        events: &mut Vec<SimEvent>,
    ) {
        if !self.alive || self.invuln.is_invulnerable_to(source, now_ms) {
            return;
        }
        self.invuln.mark(source, now_ms);
        self.health -= amount;
        events.push(SimEvent::PlayerDamaged { amount });
        if self.health <= 0 {
            self.health = 0;
            self.alive = false;
            events.push(SimEvent::PlayerDied);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Vec<Platform> {
        vec![Platform::new(
            Rect::new(0.0, 200.0, 2000.0, 20.0),
            PlatformKind::Solid,
        )]
    }

    fn grounded_player() -> Player {
        // Bottom flush with the floor top; first tick of gravity re-grounds.
        Player::new(Vec2::new(50.0, 180.0), PlayerConfig::default())
    }

    fn walk(move_x: f32) -> InputSnapshot {
        InputSnapshot {
            move_x,
            ..Default::default()
        }
    }

    fn run(player: &mut Player, input: InputSnapshot, platforms: &mut [Platform], ticks: u64) {
        let mut events = Vec::new();
        for t in 0..ticks {
            player.step(&input, t * 16, platforms, &mut events);
        }
    }

    #[test]
    fn walking_accelerates_up_to_max_speed() {
        let mut platforms = floor();
        let mut player = grounded_player();
        run(&mut player, walk(1.0), &mut platforms, 100);
        assert_eq!(player.velocity.x, player.config.max_speed);
        assert_eq!(player.facing, Facing::Right);
        assert!(player.on_ground);
    }

    #[test]
    fn releasing_input_stops_instantly_on_solid_ground() {
        let mut platforms = floor();
        let mut player = grounded_player();
        run(&mut player, walk(1.0), &mut platforms, 30);
        assert!(player.velocity.x > 0.0);
        run(&mut player, walk(0.0), &mut platforms, 1);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn slippery_ground_keeps_momentum() {
        let mut platforms = vec![Platform::new(
            Rect::new(0.0, 200.0, 2000.0, 20.0),
            PlatformKind::Slippery,
        )];
        let mut player = grounded_player();
        run(&mut player, walk(1.0), &mut platforms, 30);
        let sliding = player.velocity.x;
        assert!(sliding > 0.0);
        run(&mut player, walk(0.0), &mut platforms, 1);
        assert_eq!(player.velocity.x, sliding);
        assert_eq!(player.surface, Some(PlatformKind::Slippery));
    }

    #[test]
    fn ice_handling_does_not_carry_into_the_air() {
        let mut platforms = vec![Platform::new(
            Rect::new(0.0, 200.0, 2000.0, 20.0),
            PlatformKind::Slippery,
        )];
        let mut player = grounded_player();
        run(&mut player, walk(1.0), &mut platforms, 30);
        assert_eq!(player.surface, Some(PlatformKind::Slippery));

        let jump = InputSnapshot {
            move_x: 1.0,
            jump_held: true,
            ..Default::default()
        };
        player.step(&jump, 10_000, &mut platforms, &mut events_sink());
        assert!(!player.on_ground);
        assert_eq!(player.surface, None);

        // Mid-air the player handles like on grippy ground: releasing the
        // stick stops horizontal motion instantly.
        player.step(&walk(0.0), 10_016, &mut platforms, &mut events_sink());
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn jump_launches_from_the_ground() {
        let mut platforms = floor();
        let mut player = grounded_player();
        run(&mut player, walk(0.0), &mut platforms, 2);
        assert!(player.on_ground);

        let mut events = Vec::new();
        let jump = InputSnapshot {
            jump_held: true,
            ..Default::default()
        };
        player.step(&jump, 1000, &mut platforms, &mut events);
        assert!(!player.on_ground);
        // One tick of gravity has already been applied to the impulse.
        assert_eq!(
            player.velocity.y,
            player.config.jump_power + player.config.gravity
        );
        assert_eq!(player.state(), PlayerState::Airborne);
    }

    #[test]
    fn hazard_contact_is_lethal() {
        let mut platforms = vec![Platform::new(
            Rect::new(0.0, 200.0, 400.0, 20.0),
            PlatformKind::Hazard,
        )];
        let mut player = grounded_player();
        let mut events = Vec::new();
        for t in 0..5 {
            player.step(&walk(0.0), t * 16, &mut platforms, &mut events);
        }
        assert!(!player.alive);
        assert_eq!(player.health, 0);
        assert_eq!(player.state(), PlayerState::Dead);
        assert!(events.contains(&SimEvent::PlayerDied));
    }

    #[test]
    fn damage_windows_are_per_source() {
        let mut player = grounded_player();
        let mut events = Vec::new();
        let a = SourceId(1);
        let b = SourceId(2);

        player.take_damage(10, a, 1000, &mut events);
        player.take_damage(10, a, 1500, &mut events);
        assert_eq!(player.health, 90);

        player.take_damage(10, b, 1500, &mut events);
        assert_eq!(player.health, 80);

        player.take_damage(10, a, 2000, &mut events);
        assert_eq!(player.health, 70);
    }

    #[test]
    fn firing_needs_the_gun_and_respects_the_cooldown() {
        let mut platforms = floor();
        let mut player = grounded_player();
        let mut events = Vec::new();
        let fire = InputSnapshot {
            fire_held: true,
            ..Default::default()
        };

        assert!(player.step(&fire, 16, &mut platforms, &mut events).is_none());

        player.has_gun = true;
        let shot = player.step(&fire, 32, &mut platforms, &mut events);
        let shot = shot.unwrap();
        assert_eq!(shot.direction, 1.0);
        assert_eq!(shot.origin.x, player.rect.center().x + 30.0);
        assert!(events.contains(&SimEvent::PlayerFired));

        // 200 ms rate limit.
        assert!(player.step(&fire, 48, &mut platforms, &mut events).is_none());
        assert!(player.step(&fire, 232, &mut platforms, &mut events).is_some());
    }

    #[test]
    fn grabbing_a_ladder_centers_and_climbing_reaches_the_top() {
        let mut platforms = vec![
            Platform::new(Rect::new(0.0, 200.0, 400.0, 20.0), PlatformKind::Solid),
            Platform::new(Rect::new(100.0, 80.0, 30.0, 120.0), PlatformKind::Ladder),
        ];
        // Overlapping the ladder body from the side, falling in.
        let mut player = Player::new(Vec2::new(118.0, 150.0), PlayerConfig::default());
        run(&mut player, walk(0.0), &mut platforms, 1);
        assert!(player.in_ladder);
        assert_eq!(player.rect.center().x, 115.0);
        assert_eq!(player.surface, Some(PlatformKind::Ladder));

        let up = InputSnapshot {
            up_held: true,
            ..Default::default()
        };
        for t in 1..40 {
            player.step(&up, t * 16, &mut platforms, &mut events_sink());
        }
        assert!(player.at_ladder_top);
        assert_eq!(player.state(), PlayerState::AtLadderTop);
        // Never climbs above the rail.
        assert!(player.rect.bottom() > platforms[1].rect.top());
    }

    #[test]
    fn ladder_top_jump_is_damped() {
        let mut platforms = vec![
            Platform::new(Rect::new(0.0, 200.0, 400.0, 20.0), PlatformKind::Solid),
            Platform::new(Rect::new(100.0, 80.0, 30.0, 120.0), PlatformKind::Ladder),
        ];
        let mut player = Player::new(Vec2::new(118.0, 150.0), PlayerConfig::default());
        let up = InputSnapshot {
            up_held: true,
            ..Default::default()
        };
        for t in 0..40 {
            player.step(&up, t * 16, &mut platforms, &mut events_sink());
        }
        assert!(player.at_ladder_top);

        let jump = InputSnapshot {
            jump_held: true,
            ..Default::default()
        };
        player.step(&jump, 10_000, &mut platforms, &mut events_sink());
        assert!(!player.in_ladder);
        assert_eq!(
            player.velocity.y,
            player.config.jump_power * player.config.sticky_jump_factor + player.config.gravity
        );
    }

    fn events_sink() -> Vec<SimEvent> {
        Vec::new()
    }
}
