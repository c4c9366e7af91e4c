//! Agent variants and the shared step contract

use serde::{Deserialize, Serialize};

use crate::agents::hunter::Hunter;
use crate::agents::pawn::Pawn;
use crate::core::types::{AgentId, Position};
use crate::maze::grid::Grid;
use crate::simulation::occupancy::Occupancy;

/// Agent kind, for views and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    Pawn,
    Hunter,
}

/// Read-only view of the world an agent steps against
#[derive(Debug, Clone, Copy)]
pub struct AgentContext<'a> {
    pub id: AgentId,
    pub grid: &'a Grid,
    pub occupancy: &'a Occupancy,
    pub player: Position,
    pub noise_level: u32,
    pub pawn_alert_range: u32,
}

/// What happened when an agent took its step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// Did not move (waiting, blocked, or standing guard)
    Stayed,
    Moved { from: Position, to: Position },
    /// A pawn stepped (possibly in place) and heard the player close by
    RaisedAlert { from: Position, to: Position },
    /// A hunter lost its trail and went back to patrolling
    Disengaged { at: Position },
    /// The agent's next step was the player's cell
    CaughtPlayer { at: Position },
}

/// A patrol-only pawn or a pursuit-capable hunter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Agent {
    Pawn(Pawn),
    Hunter(Hunter),
}

impl Agent {
    pub fn position(&self) -> Position {
        match self {
            Agent::Pawn(pawn) => pawn.position(),
            Agent::Hunter(hunter) => hunter.position(),
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Pawn(_) => AgentKind::Pawn,
            Agent::Hunter(_) => AgentKind::Hunter,
        }
    }

    /// Take one movement step
    pub fn advance(&mut self, ctx: &AgentContext<'_>) -> StepOutcome {
        match self {
            Agent::Pawn(pawn) => pawn.advance(ctx),
            Agent::Hunter(hunter) => hunter.advance(ctx),
        }
    }

    pub fn as_hunter(&self) -> Option<&Hunter> {
        match self {
            Agent::Hunter(hunter) => Some(hunter),
            Agent::Pawn(_) => None,
        }
    }

    pub fn as_hunter_mut(&mut self) -> Option<&mut Hunter> {
        match self {
            Agent::Hunter(hunter) => Some(hunter),
            Agent::Pawn(_) => None,
        }
    }

    pub fn as_pawn(&self) -> Option<&Pawn> {
        match self {
            Agent::Pawn(pawn) => Some(pawn),
            Agent::Hunter(_) => None,
        }
    }
}

impl From<Pawn> for Agent {
    fn from(pawn: Pawn) -> Self {
        Agent::Pawn(pawn)
    }
}

impl From<Hunter> for Agent {
    fn from(hunter: Hunter) -> Self {
        Agent::Hunter(hunter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dispatch() {
        let pawn: Agent = Pawn::new(vec![Position::new(1, 1)]).unwrap().into();
        let hunter: Agent = Hunter::new(Position::new(2, 2), 1).into();

        assert_eq!(pawn.kind(), AgentKind::Pawn);
        assert_eq!(hunter.kind(), AgentKind::Hunter);
        assert_eq!(pawn.position(), Position::new(1, 1));
        assert_eq!(hunter.position(), Position::new(2, 2));
    }

    #[test]
    fn test_variant_accessors() {
        let mut hunter: Agent = Hunter::new(Position::new(2, 2), 1).into();
        assert!(hunter.as_hunter().is_some());
        assert!(hunter.as_hunter_mut().is_some());
        assert!(hunter.as_pawn().is_none());

        let pawn: Agent = Pawn::new(vec![Position::new(1, 1)]).unwrap().into();
        assert!(pawn.as_hunter().is_none());
        assert!(pawn.as_pawn().is_some());
    }
}
