//! Shadow Maze - tile-grid stealth simulation
//!
//! A player crosses a generated maze to the finish while pawns patrol and
//! hunters give chase, driven by the noise the player makes.

pub mod agents;
pub mod core;
pub mod maze;
pub mod noise;
pub mod simulation;

pub use crate::core::{Direction, MazeError, Position, Result, SimulationConfig};
pub use crate::simulation::{MoveResult, Outcome, Simulation, Snapshot, TickResult};
