//! Smooth-follow camera.
//!
//! The camera stores a world-to-screen offset, not a position: a rect passed
//! through [`Camera::apply`] lands in screen coordinates. Each tick the
//! offset eases one tenth of the remaining distance toward centering the
//! target, per axis, then clamps so the view never leaves the world. This is
//! the only transform shells are allowed to use; simulation code never reads
//! the offset back.

use glam::Vec2;
use jb_core::geom::Rect;

pub const FOLLOW_DIVISOR: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub offset: Vec2,
    pub screen_width: f32,
    pub screen_height: f32,
    pub world_width: f32,
    pub world_height: f32,
}

impl Camera {
    pub fn new(screen: (f32, f32), world: (f32, f32)) -> Self {
        Self {
            offset: Vec2::ZERO,
            screen_width: screen.0,
            screen_height: screen.1,
            world_width: world.0,
            world_height: world.1,
        }
    }

    /// Eases toward centering `target` in the view, then clamps to world
    /// bounds. Convergence is asymptotic: each tick closes 1/10 of the gap.
    pub fn update(&mut self, target: &Rect) {
        let view_center = -self.offset
            + Vec2::new(self.screen_width * 0.5, self.screen_height * 0.5);
        let gap = target.center() - view_center;
        self.offset -= gap / FOLLOW_DIVISOR;

        let min_x = -(self.world_width - self.screen_width);
        let min_y = -(self.world_height - self.screen_height);
        self.offset.x = self.offset.x.clamp(min_x.min(0.0), 0.0);
        self.offset.y = self.offset.y.clamp(min_y.min(0.0), 0.0);
    }

    /// World-space rect to screen-space rect.
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.translate(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new((800.0, 600.0), (1600.0, 1200.0))
    }

    #[test]
    fn offset_stays_within_world_bounds() {
        let mut cam = camera();
        let far_corner = Rect::new(1590.0, 1190.0, 10.0, 10.0);
        for _ in 0..500 {
            cam.update(&far_corner);
            assert!(cam.offset.x >= -800.0 && cam.offset.x <= 0.0);
            assert!(cam.offset.y >= -600.0 && cam.offset.y <= 0.0);
        }

        let origin_corner = Rect::new(0.0, 0.0, 10.0, 10.0);
        for _ in 0..500 {
            cam.update(&origin_corner);
            assert!(cam.offset.x >= -800.0 && cam.offset.x <= 0.0);
            assert!(cam.offset.y >= -600.0 && cam.offset.y <= 0.0);
        }
    }

    #[test]
    fn camera_converges_on_interior_target() {
        let mut cam = camera();
        let target = Rect::from_center(Vec2::new(800.0, 600.0), 20.0, 20.0);
        for _ in 0..500 {
            cam.update(&target);
        }
        let view_center =
            -cam.offset + Vec2::new(cam.screen_width * 0.5, cam.screen_height * 0.5);
        assert!((view_center - target.center()).length() < 1.0);
    }

    #[test]
    fn apply_translates_into_screen_space() {
        let mut cam = camera();
        cam.offset = Vec2::new(-100.0, -50.0);
        let world_rect = Rect::new(150.0, 75.0, 10.0, 10.0);
        let screen_rect = cam.apply(&world_rect);
        assert_eq!(screen_rect.x, 50.0);
        assert_eq!(screen_rect.y, 25.0);
        assert_eq!(screen_rect.w, world_rect.w);
    }

    #[test]
    fn world_smaller_than_screen_pins_to_origin() {
        let mut cam = Camera::new((800.0, 600.0), (400.0, 300.0));
        cam.update(&Rect::new(200.0, 150.0, 10.0, 10.0));
        assert_eq!(cam.offset, Vec2::ZERO);
    }
}
