//! Simulation configuration with documented constants
//!
//! Every knob the presentation layer may turn lives here. Defaults come from
//! `core::constants`; a TOML file may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_ENEMY_MOVEMENT_INTERVAL_MS, DEFAULT_EXTRA_OPENING_FRACTION,
    DEFAULT_HUNTER_DETECTION_RANGE, DEFAULT_NOISE_DECAY_INTERVAL_MS, DEFAULT_NUM_HUNTERS,
    DEFAULT_NUM_PAWNS, DEFAULT_PAWN_ALERT_RANGE,
};
use crate::core::error::{MazeError, Result};

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === TIMING ===
    /// Agents take at most one step per elapsed interval
    ///
    /// This is a global cadence: every agent moves on the same beat,
    /// independent of how often the caller ticks the simulation.
    pub enemy_movement_interval_ms: u64,

    /// Noise drops by one per elapsed interval
    ///
    /// Measured from the later of the last decay and the last player move,
    /// so a player who keeps walking never gets quieter.
    pub noise_decay_interval_ms: u64,

    // === DETECTION ===
    /// How close (Manhattan) a patrolling hunter notices a noisy player itself
    pub hunter_detection_range: u32,

    /// How close (Manhattan) a pawn must step to a noisy player to alert hunters
    ///
    /// Independent of `hunter_detection_range`.
    pub pawn_alert_range: u32,

    // === POPULATION ===
    pub num_pawns: usize,
    pub num_hunters: usize,

    // === MAZE ===
    /// Fraction of interior walls knocked out after carving (0.0 - 1.0)
    ///
    /// Zero leaves a perfect maze with exactly one route between any two
    /// cells; higher values add loops that let the player shake pursuit.
    pub extra_opening_fraction: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enemy_movement_interval_ms: DEFAULT_ENEMY_MOVEMENT_INTERVAL_MS,
            noise_decay_interval_ms: DEFAULT_NOISE_DECAY_INTERVAL_MS,
            hunter_detection_range: DEFAULT_HUNTER_DETECTION_RANGE,
            pawn_alert_range: DEFAULT_PAWN_ALERT_RANGE,
            num_pawns: DEFAULT_NUM_PAWNS,
            num_hunters: DEFAULT_NUM_HUNTERS,
            extra_opening_fraction: DEFAULT_EXTRA_OPENING_FRACTION,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.enemy_movement_interval_ms == 0 {
            return Err(MazeError::InvalidConfig(
                "enemy_movement_interval_ms must be positive".into(),
            ));
        }

        if self.noise_decay_interval_ms == 0 {
            return Err(MazeError::InvalidConfig(
                "noise_decay_interval_ms must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.extra_opening_fraction) {
            return Err(MazeError::InvalidConfig(format!(
                "extra_opening_fraction ({}) must be within 0.0..=1.0",
                self.extra_opening_fraction
            )));
        }

        Ok(())
    }

    /// Total number of agents to spawn
    pub fn agent_count(&self) -> usize {
        self.num_pawns + self.num_hunters
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string. Missing keys keep their defaults.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
