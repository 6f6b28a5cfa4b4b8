//! Animation scheduler
//!
//! Owns a set of springs and advances them together once per frame. The
//! frame delta is supplied by the caller so a host can drive it from its own
//! clock (and tests can drive it deterministically).

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct SpringId;
}

/// Ticks all registered springs
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Advance every spring by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Check if any springs are still moving
    pub fn has_active_animations(&self) -> bool {
        self.springs.values().any(|s| !s.is_settled())
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}
