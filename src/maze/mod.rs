//! Maze terrain, generation, placement and pathfinding
//!
//! Terrain is static once the finish is placed. Everything that moves is
//! tracked elsewhere.

pub mod generation;
pub mod grid;
pub mod pathfinding;
pub mod placement;

pub use generation::{generate_maze, random_seed};
pub use grid::{Grid, Terrain};
pub use pathfinding::{find_path, path_is_valid};
pub use placement::{patrol_route, place_finish, spawn_points};
