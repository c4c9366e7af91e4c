//! Player noise level with time-gated decay
//!
//! Each accepted player move adds one. While the level is above zero it
//! drops by one per decay interval, counted from the later of the last decay
//! and the last move.

use serde::{Deserialize, Serialize};

use crate::core::types::Millis;

/// Scalar noise level and its timers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseField {
    level: u32,
    last_increment_at: Millis,
    last_decay_at: Millis,
    decay_interval_ms: Millis,
}

impl NoiseField {
    /// Silent field whose timers start at `now`
    pub fn new(decay_interval_ms: Millis, now: Millis) -> Self {
        Self {
            level: 0,
            last_increment_at: now,
            last_decay_at: now,
            decay_interval_ms,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_silent(&self) -> bool {
        self.level == 0
    }

    pub fn last_increment_at(&self) -> Millis {
        self.last_increment_at
    }

    pub fn last_decay_at(&self) -> Millis {
        self.last_decay_at
    }

    /// Record an accepted player move
    pub fn on_player_move(&mut self, now: Millis) {
        self.level = self.level.saturating_add(1);
        self.last_increment_at = now;
    }

    /// Apply at most one decay step. Returns true if the level dropped.
    pub fn tick(&mut self, now: Millis) -> bool {
        if self.level == 0 {
            return false;
        }

        let since_decay = now.saturating_sub(self.last_decay_at);
        let since_increment = now.saturating_sub(self.last_increment_at);
        if since_decay < self.decay_interval_ms || since_increment < self.decay_interval_ms {
            return false;
        }

        self.level -= 1;
        self.last_decay_at = now;
        true
    }

    /// How far (in steps) noise currently carries
    pub fn propagation_radius(&self) -> u32 {
        self.level
    }
}
