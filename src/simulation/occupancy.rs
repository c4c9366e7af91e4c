//! Dynamic occupancy layer
//!
//! Who stands where, kept apart from the static terrain grid so that moving
//! entities never overwrite Open/Finish cells.

use ahash::AHashMap;
use serde::Serialize;

use crate::core::types::{AgentId, Position};

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Occupant {
    Player,
    Agent(AgentId),
}

/// Position -> occupant map. At most one occupant per cell.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: AHashMap<Position, Occupant>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&self, pos: Position) -> Option<Occupant> {
        self.cells.get(&pos).copied()
    }

    pub fn agent_at(&self, pos: Position) -> Option<AgentId> {
        match self.at(pos) {
            Some(Occupant::Agent(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Is `pos` held by an agent other than `me`?
    pub fn is_held_by_other_agent(&self, pos: Position, me: AgentId) -> bool {
        self.agent_at(pos).is_some_and(|id| id != me)
    }

    /// Put an occupant on an empty cell. Returns false if the cell is taken.
    pub fn place(&mut self, pos: Position, occupant: Occupant) -> bool {
        if self.cells.contains_key(&pos) {
            return false;
        }
        self.cells.insert(pos, occupant);
        true
    }

    /// Move whatever stands on `from` to an empty `to`
    ///
    /// Returns false, changing nothing, if `from` is empty or `to` is taken.
    pub fn relocate(&mut self, from: Position, to: Position) -> bool {
        if from == to {
            return self.cells.contains_key(&from);
        }
        if self.cells.contains_key(&to) {
            return false;
        }
        match self.cells.remove(&from) {
            Some(occupant) => {
                self.cells.insert(to, occupant);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_query() {
        let mut occ = Occupancy::new();
        assert!(occ.place(Position::new(1, 1), Occupant::Player));
        assert!(occ.place(Position::new(1, 2), Occupant::Agent(AgentId(0))));

        assert_eq!(occ.at(Position::new(1, 1)), Some(Occupant::Player));
        assert_eq!(occ.agent_at(Position::new(1, 1)), None);
        assert_eq!(occ.agent_at(Position::new(1, 2)), Some(AgentId(0)));
        assert!(!occ.is_occupied(Position::new(3, 3)));
        assert_eq!(occ.len(), 2);
    }

    #[test]
    fn test_place_refuses_stacking() {
        let mut occ = Occupancy::new();
        assert!(occ.place(Position::new(1, 1), Occupant::Agent(AgentId(0))));
        assert!(!occ.place(Position::new(1, 1), Occupant::Agent(AgentId(1))));
        assert_eq!(occ.agent_at(Position::new(1, 1)), Some(AgentId(0)));
    }

    #[test]
    fn test_relocate() {
        let mut occ = Occupancy::new();
        occ.place(Position::new(1, 1), Occupant::Player);
        occ.place(Position::new(1, 3), Occupant::Agent(AgentId(4)));

        assert!(occ.relocate(Position::new(1, 1), Position::new(1, 2)));
        assert_eq!(occ.at(Position::new(1, 2)), Some(Occupant::Player));
        assert!(!occ.is_occupied(Position::new(1, 1)));

        // Target taken
        assert!(!occ.relocate(Position::new(1, 2), Position::new(1, 3)));
        assert_eq!(occ.at(Position::new(1, 2)), Some(Occupant::Player));

        // Nothing to move
        assert!(!occ.relocate(Position::new(5, 5), Position::new(5, 6)));
    }

    #[test]
    fn test_held_by_other_agent() {
        let mut occ = Occupancy::new();
        occ.place(Position::new(2, 2), Occupant::Agent(AgentId(1)));
        assert!(occ.is_held_by_other_agent(Position::new(2, 2), AgentId(0)));
        assert!(!occ.is_held_by_other_agent(Position::new(2, 2), AgentId(1)));
        assert!(!occ.is_held_by_other_agent(Position::new(2, 3), AgentId(0)));
    }
}
