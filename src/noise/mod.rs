//! Noise model: the player's loudness and how far it carries

pub mod field;
pub mod propagation;

pub use field::NoiseField;
pub use propagation::{overlay_cells, reachable_within};
