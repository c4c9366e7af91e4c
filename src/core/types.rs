//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Milliseconds on a caller-owned monotonic clock
pub type Millis = u64;

/// Unique identifier for agents (index into the agent pool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Grid position as (row, col)
///
/// Signed so that neighbor candidates off the edge of the grid can be
/// represented and rejected by bounds checks instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance
    pub fn distance(&self, other: &Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The neighboring position one step in `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// All 4 orthogonal neighbors, in `Direction::ALL` order
    pub fn neighbors(&self) -> [Position; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Is `other` exactly one orthogonal step away?
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }
}

/// Directional intent submitted by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) offset
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Parse a key name: W/A/S/D (any case) or the direction word
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Some(Direction::Up),
            "s" | "down" => Some(Direction::Down),
            "a" | "left" => Some(Direction::Left),
            "d" | "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 3);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(b.distance(&a), 5);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_step_and_opposite_cancel() {
        let p = Position::new(5, 5);
        for dir in Direction::ALL {
            assert_eq!(p.step(dir).step(dir.opposite()), p);
            assert!(p.is_adjacent(&p.step(dir)));
        }
    }

    #[test]
    fn test_neighbors_order() {
        let p = Position::new(2, 2);
        assert_eq!(
            p.neighbors(),
            [
                Position::new(1, 2),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_direction_from_key() {
        assert_eq!(Direction::from_key("W"), Some(Direction::Up));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key(" s "), Some(Direction::Down));
        assert_eq!(Direction::from_key("Right"), Some(Direction::Right));
        assert_eq!(Direction::from_key("x"), None);
        assert_eq!(Direction::from_key(""), None);
    }

    #[test]
    fn test_agent_id_index() {
        assert_eq!(AgentId::new(3).index(), 3);
        assert!(AgentId(1) < AgentId(2));
    }
}
