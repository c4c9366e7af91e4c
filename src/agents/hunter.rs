//! Hunters: agents that chase the player along A* paths
//!
//! State machine: Patrolling -> Alerted -> Pursuing -> Patrolling.
//!
//! A hunter is alerted either by a pawn's broadcast (immediately, with a fresh
//! path) or by hearing the player within its own detection range while
//! patrolling (flagged as pending, acted on at its next movement step). Each
//! movement step consumes one cell of the path. An exhausted path or a step
//! that has become impossible sends it back to patrolling.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::agents::agent::{AgentContext, StepOutcome};
use crate::core::types::Position;
use crate::maze::grid::Grid;
use crate::maze::pathfinding::find_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HunterState {
    #[default]
    Patrolling,
    /// Holding a fresh path, not yet stepped along it
    Alerted,
    /// Following its path
    Pursuing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunter {
    position: Position,
    detection_range: u32,
    state: HunterState,
    path: VecDeque<Position>,
    pending_activation: bool,
}

impl Hunter {
    pub fn new(position: Position, detection_range: u32) -> Self {
        Self {
            position,
            detection_range,
            state: HunterState::Patrolling,
            path: VecDeque::new(),
            pending_activation: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn detection_range(&self) -> u32 {
        self.detection_range
    }

    pub fn state(&self) -> HunterState {
        self.state
    }

    /// Alerted or pursuing
    pub fn is_pursuing(&self) -> bool {
        matches!(self.state, HunterState::Alerted | HunterState::Pursuing)
    }

    pub fn pending_activation(&self) -> bool {
        self.pending_activation
    }

    /// Remaining pursuit path, next step first
    pub fn path(&self) -> &VecDeque<Position> {
        &self.path
    }

    /// Replace the pursuit path with a fresh route to `target`
    ///
    /// Returns false, leaving the hunter patrolling, when no path exists.
    pub fn alert(&mut self, grid: &Grid, target: Position) -> bool {
        self.pending_activation = false;
        let path = find_path(grid, self.position, target);
        if path.is_empty() {
            self.disengage();
            return false;
        }
        self.path = path.into();
        self.state = HunterState::Alerted;
        true
    }

    fn disengage(&mut self) {
        self.path.clear();
        self.state = HunterState::Patrolling;
    }

    fn hears_player(&self, ctx: &AgentContext<'_>) -> bool {
        ctx.noise_level > 0 && self.position.distance(&ctx.player) <= self.detection_range
    }

    pub fn advance(&mut self, ctx: &AgentContext<'_>) -> StepOutcome {
        if self.state == HunterState::Patrolling {
            if !self.pending_activation {
                if self.hears_player(ctx) {
                    tracing::debug!("Hunter {:?} heard the player at {:?}", ctx.id, ctx.player);
                    self.pending_activation = true;
                }
                return StepOutcome::Stayed;
            }
            if !self.alert(ctx.grid, ctx.player) {
                return StepOutcome::Stayed;
            }
        }

        let Some(next) = self.path.pop_front() else {
            self.disengage();
            return StepOutcome::Disengaged { at: self.position };
        };

        if next == ctx.player && self.position.is_adjacent(&next) {
            return StepOutcome::CaughtPlayer { at: next };
        }

        let blocked = !self.position.is_adjacent(&next)
            || !ctx.grid.is_walkable(next)
            || ctx.occupancy.is_held_by_other_agent(next, ctx.id);
        if blocked {
            self.disengage();
            return StepOutcome::Disengaged { at: self.position };
        }

        let from = self.position;
        self.position = next;
        self.state = HunterState::Pursuing;
        StepOutcome::Moved { from, to: next }
    }
}
