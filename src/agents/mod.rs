//! Agents - patrolling pawns and pursuing hunters
//!
//! Agents are a tagged enum with one `advance` entry point; the pool drives
//! them on a shared movement clock.

pub mod agent;
pub mod hunter;
pub mod pawn;
pub mod pool;

pub use agent::{Agent, AgentContext, AgentKind, StepOutcome};
pub use hunter::{Hunter, HunterState};
pub use pawn::Pawn;
pub use pool::{AgentPool, AgentWorld, PoolAdvance};
