//! Input state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the
//!   key is physically down. Used for continuous actions like movement and
//!   ladder climbing.
//!
//! - **Edge-triggered (just_pressed / just_released):** True only during the
//!   frame the transition happened; cleared by `end_frame()`.
//!
//! The simulation never reads keys directly. It consumes an [`InputSnapshot`]
//! sampled once per tick, so every system within that tick sees the same
//! input state.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Fire,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

/// Immutable per-tick view of the held keys, pre-digested into the axes and
/// action flags the motion controller cares about.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub move_x: f32,
    pub up_held: bool,
    pub down_held: bool,
    pub jump_held: bool,
    pub fire_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn snapshot(&self) -> InputSnapshot {
        let mut move_x = 0.0;
        if self.is_held(Key::Left) {
            move_x -= 1.0;
        }
        if self.is_held(Key::Right) {
            move_x += 1.0;
        }
        InputSnapshot {
            move_x,
            up_held: self.is_held(Key::Up),
            down_held: self.is_held(Key::Down),
            jump_held: self.is_held(Key::Jump),
            fire_held: self.is_held(Key::Fire),
        }
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Jump);
        assert!(input.is_held(Key::Jump));
        assert!(input.is_just_pressed(Key::Jump));
    }

    #[test]
    fn test_key_down_repeat_does_not_double_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.end_frame();
        // OS key repeat: held already contains the key, so no new edge.
        input.key_down(Key::Left);
        assert!(input.is_held(Key::Left));
        assert!(!input.is_just_pressed(Key::Left));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Fire);
        assert!(!input.is_just_released(Key::Fire));
        assert!(!input.is_held(Key::Fire));
    }

    #[test]
    fn test_end_frame_keeps_held_state() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.end_frame();
        assert!(input.is_held(Key::Right));
        assert!(!input.is_just_pressed(Key::Right));
    }

    #[test]
    fn test_snapshot_digests_movement_axis() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert_eq!(input.snapshot().move_x, -1.0);
        input.key_down(Key::Right);
        // Both directions held cancel out.
        assert_eq!(input.snapshot().move_x, 0.0);
        input.key_up(Key::Left);
        assert_eq!(input.snapshot().move_x, 1.0);
    }

    #[test]
    fn test_snapshot_copies_action_flags() {
        let mut input = InputState::new();
        input.key_down(Key::Jump);
        input.key_down(Key::Down);
        let snap = input.snapshot();
        assert!(snap.jump_held);
        assert!(snap.down_held);
        assert!(!snap.fire_held);
        assert!(!snap.up_held);
    }
}
