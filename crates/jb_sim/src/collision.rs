//! Discrete penetration resolver for axis-aligned actors against the
//! platform set.
//!
//! The algorithm is minimum-overlap separation, not move-and-slide: the
//! actor has already been integrated for this tick, and each intersecting
//! platform is pushed out along the axis with the smallest penetration
//! depth. The axis check order is **top, bottom, left, right**, so an exact
//! tie between two minimal depths resolves to the earlier axis (landing
//! beats wall contact). Each correction is gated on velocity direction --
//! a top correction only applies while falling (vy >= 0) -- which prevents
//! re-resolving a platform the actor is moving away from.
//!
//! Overlaps are resolved independently in platform order against the same
//! tick's velocity; there is no iterative constraint solving. Platforms are
//! static grid-aligned shapes with an authoring-enforced minimum size, so
//! the tunneling this permits at extreme speeds is accepted.
//!
//! Teleporters never take part here (see `platform::try_teleport`). Ladders
//! take part only through their landing case: an actor falling onto a
//! ladder's top edge stands on it like a solid unless the down control is
//! held, and the outcome reports `ladder_top` either way.

use glam::Vec2;
use jb_core::geom::{OverlapDepths, Rect};

use crate::platform::Platform;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Down control held: falling onto a ladder top passes through.
    pub down_held: bool,
    /// Skip ladders entirely (enemies never climb).
    pub ignore_ladders: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolveOutcome {
    pub rect: Rect,
    pub velocity: Vec2,
    pub on_ground: bool,
    /// Blocked while moving left / right (wall contact on that side).
    pub blocked_left: bool,
    pub blocked_right: bool,
    /// Actor bottom met a ladder's top edge while falling.
    pub ladder_top: bool,
    pub touched_hazard: bool,
    pub touched_slippery: bool,
    pub touched_solid: bool,
}

pub fn resolve(
    rect: Rect,
    velocity: Vec2,
    platforms: &[Platform],
    options: ResolveOptions,
) -> ResolveOutcome {
    let mut out = ResolveOutcome {
        rect,
        velocity,
        on_ground: false,
        blocked_left: false,
        blocked_right: false,
        ladder_top: false,
        touched_hazard: false,
        touched_slippery: false,
        touched_solid: false,
    };

    for platform in platforms {
        if platform.kind.teleporting() {
            continue;
        }
        if !out.rect.intersects(&platform.rect) {
            continue;
        }

        if platform.kind.climbable() {
            if options.ignore_ladders {
                continue;
            }
            let depths = OverlapDepths::between(&out.rect, &platform.rect);
            if depths.min() == depths.from_top && out.velocity.y >= 0.0 {
                out.ladder_top = true;
                if !options.down_held {
                    out.rect.set_bottom(platform.rect.top());
                    out.velocity.y = 0.0;
                    out.on_ground = true;
                }
            }
            continue;
        }

        let depths = OverlapDepths::between(&out.rect, &platform.rect);
        let min = depths.min();
        if min == depths.from_top && out.velocity.y >= 0.0 {
            out.rect.set_bottom(platform.rect.top());
            out.velocity.y = 0.0;
            out.on_ground = true;
        } else if min == depths.from_bottom && out.velocity.y < 0.0 {
            out.rect.set_top(platform.rect.bottom());
            out.velocity.y = 0.0;
        } else if min == depths.from_left && out.velocity.x > 0.0 {
            out.rect.set_right(platform.rect.left());
            out.velocity.x = 0.0;
            out.blocked_right = true;
        } else if min == depths.from_right && out.velocity.x < 0.0 {
            out.rect.set_left(platform.rect.right());
            out.velocity.x = 0.0;
            out.blocked_left = true;
        }

        if platform.kind.hazardous() {
            out.touched_hazard = true;
        } else if platform.kind.frictional() {
            out.touched_slippery = true;
        } else {
            out.touched_solid = true;
        }
    }

    out
}
