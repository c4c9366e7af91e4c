//! Static terrain grid
//!
//! Terrain never records who stands on a cell; see `simulation::occupancy`.

use std::collections::VecDeque;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Static cell kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Wall,
    Open,
    Finish,
}

impl Terrain {
    /// Can anything stand here?
    pub fn is_walkable(&self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    pub fn glyph(&self) -> char {
        match self {
            Terrain::Wall => '#',
            Terrain::Open => '.',
            Terrain::Finish => 'F',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '#' => Some(Terrain::Wall),
            '.' => Some(Terrain::Open),
            'F' => Some(Terrain::Finish),
            _ => None,
        }
    }
}

/// Row-major terrain grid, `width` columns by `height` rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Create a grid of solid wall
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Terrain::Wall; width * height],
        }
    }

    /// Build a grid from glyph rows (`#` wall, `.` open, `F` finish)
    ///
    /// Returns None for ragged rows or unknown glyphs. Used for hand-built
    /// layouts; generated mazes come from `maze::generation`.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count())?;
        let mut cells = Vec::with_capacity(width * height);

        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            for c in row.chars() {
                cells.push(Terrain::from_glyph(c)?);
            }
        }

        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.width + pos.col as usize)
        } else {
            None
        }
    }

    /// Check if position is within grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Is this one of the outermost rows/columns?
    pub fn is_border(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.row == 0
                || pos.col == 0
                || pos.row as usize == self.height - 1
                || pos.col as usize == self.width - 1)
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Terrain> {
        self.index(pos).and_then(|i| self.cells.get(i).copied())
    }

    #[inline]
    pub fn set(&mut self, pos: Position, terrain: Terrain) {
        if let Some(cell) = self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            *cell = terrain;
        }
    }

    /// In bounds and not a wall
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|t| t.is_walkable())
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Terrain::Wall))
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| Position::new(row as i32, col as i32))
        })
    }

    /// Positions holding the given terrain, row-major
    pub fn cells_of(&self, terrain: Terrain) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |p| self.get(*p) == Some(terrain))
    }

    /// The finish cell, if one has been placed
    pub fn finish(&self) -> Option<Position> {
        self.cells_of(Terrain::Finish).next()
    }

    /// Walkable orthogonal neighbors, in `Direction::ALL` order
    pub fn walkable_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors()
            .into_iter()
            .filter(move |n| self.is_walkable(*n))
    }

    /// Step distance from `origin` to every walkable cell reachable from it
    pub fn distances_from(&self, origin: Position) -> AHashMap<Position, u32> {
        let mut distances = AHashMap::new();
        if !self.is_walkable(origin) {
            return distances;
        }

        let mut queue = VecDeque::new();
        distances.insert(origin, 0);
        queue.push_back(origin);

        while let Some(current) = queue.pop_front() {
            let next_distance = distances.get(&current).copied().unwrap_or(0) + 1;
            for neighbor in self.walkable_neighbors(current) {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor, next_distance);
                    queue.push_back(neighbor);
                }
            }
        }

        distances
    }

    /// Glyph rows, one string per row
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .filter_map(|col| self.get(Position::new(row as i32, col as i32)))
                    .map(|t| t.glyph())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&["#####", "#...#", "#.#.#", "#..F#", "#####"]).unwrap()
    }

    #[test]
    fn test_grid_creation_all_wall() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert!(grid.positions().all(|p| grid.is_wall(p)));
    }

    #[test]
    fn test_from_rows_roundtrip_glyphs() {
        let grid = sample();
        assert_eq!(grid.get(Position::new(1, 1)), Some(Terrain::Open));
        assert_eq!(grid.get(Position::new(2, 2)), Some(Terrain::Wall));
        assert_eq!(grid.finish(), Some(Position::new(3, 3)));
        assert_eq!(grid.to_rows()[3], "#..F#");
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_unknown() {
        assert!(Grid::from_rows(&["###", "##"]).is_none());
        assert!(Grid::from_rows(&["#?#"]).is_none());
        assert!(Grid::from_rows(&[]).is_none());
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = sample();
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert_eq!(grid.get(Position::new(0, 5)), None);
        assert!(!grid.is_walkable(Position::new(10, 10)));
    }

    #[test]
    fn test_border_detection() {
        let grid = sample();
        assert!(grid.is_border(Position::new(0, 2)));
        assert!(grid.is_border(Position::new(4, 4)));
        assert!(!grid.is_border(Position::new(2, 2)));
        assert!(!grid.is_border(Position::new(9, 9)));
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut grid = sample();
        let before = grid.clone();
        grid.set(Position::new(-3, 1), Terrain::Open);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_distances_from() {
        let grid = sample();
        let d = grid.distances_from(Position::new(1, 1));
        assert_eq!(d.get(&Position::new(1, 1)), Some(&0));
        assert_eq!(d.get(&Position::new(1, 3)), Some(&2));
        assert_eq!(d.get(&Position::new(3, 3)), Some(&4));
        assert!(!d.contains_key(&Position::new(2, 2)));
    }

    #[test]
    fn test_distances_from_wall_is_empty() {
        let grid = sample();
        assert!(grid.distances_from(Position::new(0, 0)).is_empty());
    }
}
