//! Simulation constants - all tunable defaults in one place

use crate::core::types::Position;

// Maze
pub const DEFAULT_MAZE_WIDTH: usize = 21;
pub const DEFAULT_MAZE_HEIGHT: usize = 21;
pub const MIN_MAZE_DIMENSION: usize = 3;
/// Carving always starts here; the player spawns here too
pub const MAZE_START: Position = Position::new(1, 1);
pub const DEFAULT_EXTRA_OPENING_FRACTION: f64 = 0.10;

// Time (milliseconds)
pub const DEFAULT_ENEMY_MOVEMENT_INTERVAL_MS: u64 = 500;
pub const DEFAULT_NOISE_DECAY_INTERVAL_MS: u64 = 1000;

// Detection (Manhattan distance, tiles)
pub const DEFAULT_HUNTER_DETECTION_RANGE: u32 = 1;
pub const DEFAULT_PAWN_ALERT_RANGE: u32 = 3;

// Population
pub const DEFAULT_NUM_PAWNS: usize = 3;
pub const DEFAULT_NUM_HUNTERS: usize = 2;

// Spawning
/// Preferred minimum distance between the player start and any agent spawn
pub const MIN_SPAWN_DISTANCE: u32 = 4;
/// Steps a pawn walks out before turning back along its patrol
pub const PAWN_PATROL_STEPS: usize = 4;
/// Offset applied to the maze seed for spawn and patrol rolls
pub const SPAWN_SEED_OFFSET: u64 = 1;
