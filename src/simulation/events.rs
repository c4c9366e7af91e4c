//! Simulation event log
//!
//! Everything that changes during a move or tick is recorded here, stamped
//! with the simulation clock, for the presentation layer and tests.

use serde::Serialize;

use crate::core::error::MoveError;
use crate::core::types::{AgentId, Millis, Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimEvent {
    pub at: Millis,
    pub kind: SimEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEventKind {
    PlayerMoved { from: Position, to: Position, noise: u32 },
    PlayerBlocked { reason: MoveError },
    NoiseDecayed { level: u32 },
    AgentStepped { id: AgentId, from: Position, to: Position },
    AlertRaised { by: AgentId, target: Position, hunters_alerted: usize },
    HunterAlerted { id: AgentId, path_len: usize },
    HunterDisengaged { id: AgentId, at: Position },
    PlayerCaught { by: AgentId, at: Position },
    FinishReached { at: Position },
}

/// Events accumulated since the last drain
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: Millis, kind: SimEventKind) {
        self.events.push(SimEvent { at, kind });
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every recorded event, leaving the log empty
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
