//! Fire-and-forget notifications drained from the world after each tick.
//!
//! The core never plays audio or writes telemetry itself; shells map these
//! to whatever sinks they have. No return value ever flows back in.

use crate::enemy::EnemyKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    PlayerFired,
    PlayerDamaged { amount: i32 },
    PlayerDied,
    GunPickedUp,
    Teleported,
    EnemyFired { kind: EnemyKind },
    EnemyDamaged { kind: EnemyKind, amount: i32 },
    EnemyKilled { kind: EnemyKind },
}
