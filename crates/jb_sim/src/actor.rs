//! Shared actor plumbing: stable damage-source handles, the per-source
//! invulnerability table, and facing direction.
//!
//! Damage sources are keyed by [`SourceId`] handles assigned at creation from
//! a world counter, never by memory address: entities move between `Vec`s and
//! get swept, so addresses are not stable identities.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u32);

#[derive(Debug, Clone, Copy, Default)]
pub struct IdAlloc {
    next: u32,
}

impl IdAlloc {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next(&mut self) -> SourceId {
        let id = SourceId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Per-source invulnerability bookkeeping: a source that lands a hit cannot
/// damage the same actor again until its window expires. Windows are
/// independent per source, so two enemies can both hit within one window.
#[derive(Debug, Clone)]
pub struct InvulnTable {
    duration_ms: u64,
    timers: HashMap<SourceId, u64>,
}

impl InvulnTable {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            timers: HashMap::new(),
        }
    }

    pub fn is_invulnerable_to(&self, source: SourceId, now_ms: u64) -> bool {
        match self.timers.get(&source) {
            Some(&marked) => now_ms.saturating_sub(marked) < self.duration_ms,
            None => false,
        }
    }

    pub fn mark(&mut self, source: SourceId, now_ms: u64) {
        self.timers.insert(source, now_ms);
    }

    /// Drops expired windows. Called once per tick so the table never grows
    /// past the set of recently-hitting sources.
    pub fn expire(&mut self, now_ms: u64) {
        let duration = self.duration_ms;
        self.timers
            .retain(|_, marked| now_ms.saturating_sub(*marked) < duration);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.timers.len()
    }
}
