//! Noise overlay: which cells a sound of a given radius reaches
//!
//! Walls block propagation. This is display-only; agents decide on alerts
//! with plain Manhattan distance.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::types::Position;
use crate::maze::grid::Grid;

/// Cells within `radius` walking steps of `origin`
///
/// Includes `origin` itself. A radius of zero (silence) reaches nothing, as
/// does an origin inside a wall.
pub fn reachable_within(grid: &Grid, origin: Position, radius: u32) -> AHashSet<Position> {
    let mut reached = AHashSet::new();
    if radius == 0 || !grid.is_walkable(origin) {
        return reached;
    }

    let mut queue = VecDeque::new();
    reached.insert(origin);
    queue.push_back((origin, 0u32));

    while let Some((current, depth)) = queue.pop_front() {
        if depth == radius {
            continue;
        }
        for neighbor in grid.walkable_neighbors(current) {
            if reached.insert(neighbor) {
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    reached
}

/// Overlay cells in row-major order, for stable rendering and snapshots
pub fn overlay_cells(grid: &Grid, origin: Position, radius: u32) -> Vec<Position> {
    let mut cells: Vec<Position> = reachable_within(grid, origin, radius).into_iter().collect();
    cells.sort();
    cells
}
