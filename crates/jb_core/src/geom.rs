//! Axis-aligned rectangle math: the collidable footprint of every entity.
//!
//! World coordinates are y-down: `top()` is `y`, `bottom()` is `y + h`, and
//! gravity is positive. Overlap depths measure penetration along one axis
//! between two intersecting rects; the collision resolver picks the minimum
//! depth as the resolution axis.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "rects must have positive extent");
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_center_x(&mut self, center_x: f32) {
        self.x = center_x - self.w * 0.5;
    }

    pub fn translate(&self, delta: Vec2) -> Rect {
        Rect {
            x: self.x + delta.x,
            y: self.y + delta.y,
            w: self.w,
            h: self.h,
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Steps `current` toward `target` by at most `max_delta`, without
/// overshooting. The standard easing primitive for AI chase speeds.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else if current > target {
        (current - max_delta).max(target)
    } else {
        current
    }
}

/// Penetration depths of an actor rect into a platform rect, one per side
/// the actor could have entered from.
#[derive(Debug, Clone, Copy)]
pub struct OverlapDepths {
    pub from_left: f32,
    pub from_right: f32,
    pub from_top: f32,
    pub from_bottom: f32,
}

impl OverlapDepths {
    pub fn between(actor: &Rect, platform: &Rect) -> Self {
        Self {
            from_left: actor.right() - platform.left(),
            from_right: platform.right() - actor.left(),
            from_top: actor.bottom() - platform.top(),
            from_bottom: platform.bottom() - actor.top(),
        }
    }

    pub fn min(&self) -> f32 {
        self.from_left
            .min(self.from_right)
            .min(self.from_top)
            .min(self.from_bottom)
    }
}
