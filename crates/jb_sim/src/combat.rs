//! Combat coordinator: the only place health changes hands.
//!
//! Runs after all actors have moved. Order within a tick: enemy contact
//! damage, enemy projectiles against the player, player projectiles against
//! terrain and enemies. Player invulnerability is per source, so a shot and
//! its shooter are separate sources and an invulnerable player lets enemy
//! shots pass through unconsumed.

use crate::enemy::Enemy;
use crate::event::SimEvent;
use crate::platform::Platform;
use crate::player::Player;
use crate::projectile::Projectile;

pub fn resolve_combat(
    player: &mut Player,
    enemies: &mut [Enemy],
    player_shots: &mut Vec<Projectile>,
    platforms: &[Platform],
    world_width: f32,
    world_height: f32,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) {
    // Contact damage: rate-limited per enemy, skipped entirely while the
    // player is invulnerable to that enemy so the cooldown is not consumed
    // by a hit that cannot land.
    for enemy in enemies.iter_mut() {
        if !enemy.alive || !player.alive {
            continue;
        }
        if enemy.rect.intersects(&player.rect)
            && !player.is_invulnerable_to(enemy.id, now_ms)
            && enemy.damage_cooldown.try_fire(now_ms)
        {
            player.take_damage(enemy.config.contact_damage, enemy.id, now_ms, events);
        }
    }

    for enemy in enemies.iter_mut() {
        enemy.projectiles.retain(|shot| {
            if player.alive && shot.rect.intersects(&player.rect) {
                if !player.is_invulnerable_to(shot.id, now_ms) {
                    player.take_damage(shot.damage, shot.id, now_ms, events);
                    return false;
                }
                // Invulnerable: the shot flies on.
            }
            true
        });
    }

    player_shots.retain(|shot| {
        if shot.hits_platform(platforms) || shot.off_world(world_width, world_height) {
            return false;
        }
        let hit = enemies
            .iter_mut()
            .filter(|e| e.alive && shot.rect.intersects(&e.rect))
            .min_by(|a, b| {
                let da = (a.rect.center() - shot.rect.center()).length_squared();
                let db = (b.rect.center() - shot.rect.center()).length_squared();
                da.total_cmp(&db)
            });
        match hit {
            Some(enemy) => {
                enemy.take_damage(shot.damage, now_ms, events);
                false
            }
            None => true,
        }
    });
}
