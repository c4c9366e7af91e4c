//! Pawns: patrol-only agents that raise the alarm
//!
//! A pawn walks its closed route one cell per movement step. It never chases
//! anyone; when it ends a step near a noisy player it alerts every hunter.

use serde::{Deserialize, Serialize};

use crate::agents::agent::{AgentContext, StepOutcome};
use crate::core::types::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    route: Vec<Position>,
    index: usize,
    position: Position,
}

impl Pawn {
    /// Pawn standing on the first cell of `route`. None for an empty route.
    pub fn new(route: Vec<Position>) -> Option<Self> {
        let position = *route.first()?;
        Some(Self {
            route,
            index: 0,
            position,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn route(&self) -> &[Position] {
        &self.route
    }

    pub fn route_index(&self) -> usize {
        self.index
    }

    /// Does each waypoint lead to the next (wrapping) in one orthogonal step?
    pub fn route_is_closed(&self) -> bool {
        if self.route.len() < 2 {
            return true;
        }
        self.route
            .iter()
            .zip(self.route.iter().cycle().skip(1))
            .all(|(a, b)| a.is_adjacent(b))
    }

    fn hears_player(&self, ctx: &AgentContext<'_>) -> bool {
        ctx.noise_level > 0 && self.position.distance(&ctx.player) <= ctx.pawn_alert_range
    }

    pub fn advance(&mut self, ctx: &AgentContext<'_>) -> StepOutcome {
        let next_index = (self.index + 1) % self.route.len().max(1);
        let Some(&next) = self.route.get(next_index) else {
            return StepOutcome::Stayed;
        };

        if next == ctx.player {
            return StepOutcome::CaughtPlayer { at: next };
        }

        // Wait for the way to clear rather than skipping a waypoint
        if !ctx.grid.is_walkable(next) || ctx.occupancy.is_held_by_other_agent(next, ctx.id) {
            return StepOutcome::Stayed;
        }

        let from = self.position;
        self.position = next;
        self.index = next_index;

        if self.hears_player(ctx) {
            StepOutcome::RaisedAlert { from, to: next }
        } else if from == next {
            StepOutcome::Stayed
        } else {
            StepOutcome::Moved { from, to: next }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AgentId;
    use crate::maze::grid::Grid;
    use crate::simulation::occupancy::{Occupancy, Occupant};

    fn corridor() -> Grid {
        Grid::from_rows(&["#########", "#.......#", "#########"]).unwrap()
    }

    fn ctx<'a>(grid: &'a Grid, occ: &'a Occupancy, player: Position, noise: u32) -> AgentContext<'a> {
        AgentContext {
            id: AgentId(0),
            grid,
            occupancy: occ,
            player,
            noise_level: noise,
            pawn_alert_range: 3,
        }
    }

    fn route() -> Vec<Position> {
        vec![Position::new(1, 5), Position::new(1, 6), Position::new(1, 7), Position::new(1, 6)]
    }

    #[test]
    fn test_empty_route_rejected() {
        assert!(Pawn::new(Vec::new()).is_none());
    }

    #[test]
    fn test_cycles_through_route() {
        let grid = corridor();
        let occ = Occupancy::new();
        let mut pawn = Pawn::new(route()).unwrap();
        let player = Position::new(1, 1);

        let mut visited = Vec::new();
        for _ in 0..5 {
            pawn.advance(&ctx(&grid, &occ, player, 0));
            visited.push(pawn.position());
        }
        assert_eq!(
            visited,
            vec![
                Position::new(1, 6),
                Position::new(1, 7),
                Position::new(1, 6),
                Position::new(1, 5),
                Position::new(1, 6),
            ]
        );
    }

    #[test]
    fn test_alert_needs_noise() {
        let grid = corridor();
        let occ = Occupancy::new();
        let mut pawn = Pawn::new(route()).unwrap();
        let player = Position::new(1, 3);

        let outcome = pawn.advance(&ctx(&grid, &occ, player, 0));
        assert_eq!(
            outcome,
            StepOutcome::Moved {
                from: Position::new(1, 5),
                to: Position::new(1, 6)
            }
        );
    }

    #[test]
    fn test_alert_when_noisy_and_close() {
        let grid = corridor();
        let occ = Occupancy::new();
        let mut pawn = Pawn::new(route()).unwrap();
        // Pawn steps to (1,6), 3 from the player
        let outcome = pawn.advance(&ctx(&grid, &occ, Position::new(1, 3), 1));
        assert!(matches!(outcome, StepOutcome::RaisedAlert { .. }));
    }

    #[test]
    fn test_no_alert_when_far() {
        let grid = corridor();
        let occ = Occupancy::new();
        let mut pawn = Pawn::new(route()).unwrap();
        let outcome = pawn.advance(&ctx(&grid, &occ, Position::new(1, 1), 5));
        assert!(matches!(outcome, StepOutcome::Moved { .. }));
    }

    #[test]
    fn test_catches_player_on_route() {
        let grid = corridor();
        let occ = Occupancy::new();
        let mut pawn = Pawn::new(route()).unwrap();
        let outcome = pawn.advance(&ctx(&grid, &occ, Position::new(1, 6), 0));
        assert_eq!(outcome, StepOutcome::CaughtPlayer { at: Position::new(1, 6) });
        assert_eq!(pawn.position(), Position::new(1, 5));
    }

    #[test]
    fn test_waits_for_other_agent() {
        let grid = corridor();
        let mut occ = Occupancy::new();
        occ.place(Position::new(1, 6), Occupant::Agent(AgentId(1)));
        let mut pawn = Pawn::new(route()).unwrap();

        let outcome = pawn.advance(&ctx(&grid, &occ, Position::new(1, 1), 0));
        assert_eq!(outcome, StepOutcome::Stayed);
        assert_eq!(pawn.position(), Position::new(1, 5));
        assert_eq!(pawn.route_index(), 0);
    }

    #[test]
    fn test_guard_alerts_in_place() {
        let grid = corridor();
        let occ = Occupancy::new();
        let mut pawn = Pawn::new(vec![Position::new(1, 4)]).unwrap();

        assert_eq!(
            pawn.advance(&ctx(&grid, &occ, Position::new(1, 1), 0)),
            StepOutcome::Stayed
        );
        assert!(matches!(
            pawn.advance(&ctx(&grid, &occ, Position::new(1, 2), 2)),
            StepOutcome::RaisedAlert { .. }
        ));
        assert_eq!(pawn.position(), Position::new(1, 4));
    }

    #[test]
    fn test_route_is_closed() {
        assert!(Pawn::new(route()).unwrap().route_is_closed());
        assert!(Pawn::new(vec![Position::new(1, 1)]).unwrap().route_is_closed());
        let broken = Pawn::new(vec![Position::new(1, 1), Position::new(1, 2), Position::new(1, 3)]);
        assert!(!broken.unwrap().route_is_closed());
    }
}
