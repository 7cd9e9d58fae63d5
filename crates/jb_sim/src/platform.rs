//! Static terrain: a tagged platform kind plus a capability table consumed by
//! free functions, instead of a subclass per behavior.
//!
//! Capabilities are deliberately orthogonal: the collision resolver asks
//! `is_solid`, the projectile code asks `blocks_projectiles`, the motion
//! controller asks `climbable`/`hazardous`/`frictional`. Adding a platform
//! kind means adding one enum variant and answering the predicates.

use glam::Vec2;
use jb_core::geom::Rect;
use serde::Deserialize;

use crate::event::SimEvent;

pub const TELEPORT_COOLDOWN_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PlatformKind {
    Solid,
    Ladder,
    Hazard,
    Slippery,
    Teleporter,
}

impl PlatformKind {
    /// Participates in generic penetration resolution.
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Solid | Self::Hazard | Self::Slippery)
    }

    pub fn climbable(self) -> bool {
        matches!(self, Self::Ladder)
    }

    pub fn hazardous(self) -> bool {
        matches!(self, Self::Hazard)
    }

    pub fn frictional(self) -> bool {
        matches!(self, Self::Slippery)
    }

    pub fn teleporting(self) -> bool {
        matches!(self, Self::Teleporter)
    }

    pub fn blocks_projectiles(self) -> bool {
        !matches!(self, Self::Ladder)
    }
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    /// Teleporters only: exactly one other platform may share this id.
    pub pair_id: u32,
    pub cooldown_ms: u64,
    pub last_teleport_ms: Option<u64>,
}

impl Platform {
    pub fn new(rect: Rect, kind: PlatformKind) -> Self {
        Self {
            rect,
            kind,
            pair_id: 0,
            cooldown_ms: TELEPORT_COOLDOWN_MS,
            last_teleport_ms: None,
        }
    }

    pub fn teleporter(rect: Rect, pair_id: u32) -> Self {
        Self {
            pair_id,
            ..Self::new(rect, PlatformKind::Teleporter)
        }
    }

    pub fn teleport_ready(&self, now_ms: u64) -> bool {
        match self.last_teleport_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
        }
    }
}

/// Finds the one other teleporter sharing `pair_id`. Linear scan: platform
/// sets are small and rebuilt per level.
pub fn find_pair(platforms: &[Platform], index: usize) -> Option<usize> {
    let pair_id = platforms[index].pair_id;
    platforms.iter().enumerate().position(|(i, p)| {
        i != index && p.kind.teleporting() && p.pair_id == pair_id
    })
}

/// Teleports an actor standing in teleporter `entered` to its pair: velocity
/// zeroed, horizontal center on the pair's center, bottom on the pair's top.
/// Stamps the shared cooldown on **both** ends so the destination does not
/// immediately fire back. Unpaired or cooling-down teleporters are inert.
pub fn try_teleport(
    rect: &mut Rect,
    velocity: &mut Vec2,
    entered: usize,
    platforms: &mut [Platform],
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) -> bool {
    if !platforms[entered].kind.teleporting() || !platforms[entered].teleport_ready(now_ms) {
        return false;
    }
    let Some(pair) = find_pair(platforms, entered) else {
        log::debug!(
            "teleporter pair_id={} has no partner, treating as inert",
            platforms[entered].pair_id
        );
        return false;
    };

    *velocity = Vec2::ZERO;
    rect.set_center_x(platforms[pair].rect.center().x);
    rect.set_bottom(platforms[pair].rect.top());
    platforms[entered].last_teleport_ms = Some(now_ms);
    platforms[pair].last_teleport_ms = Some(now_ms);
    events.push(SimEvent::Teleported);
    true
}
