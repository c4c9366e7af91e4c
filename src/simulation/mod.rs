//! Simulation state - terrain, occupancy, player, agents and noise
//!
//! Per move: `Simulation::handle_input`. Per tick: gated agent advance, gated
//! noise decay, terminal check.

pub mod events;
pub mod occupancy;
pub mod snapshot;
pub mod state;

pub use events::{EventLog, SimEvent, SimEventKind};
pub use occupancy::{Occupancy, Occupant};
pub use snapshot::{AgentView, Snapshot};
pub use state::{MoveResult, Outcome, Simulation, TickResult};
