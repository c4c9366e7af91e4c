//! A* pathfinding over the maze grid
//!
//! Uniform step cost, 4-directional moves, Manhattan heuristic. Equal
//! f-scores pop in insertion order so results are reproducible.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::core::types::Position;
use crate::maze::grid::Grid;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    pos: Position,
    f_cost: u32, // g_cost + heuristic
    g_cost: u32,
    seq: u64, // insertion counter, FIFO among equal f_cost
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path using A*
///
/// The returned path excludes `start` and ends at `goal`. It is empty when
/// no path exists, when `start == goal`, or when either end is not walkable;
/// callers treat empty as "no path".
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Vec<Position> {
    if start == goal || !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_scores: HashMap<Position, u32> = HashMap::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        pos: start,
        f_cost: start.distance(&goal),
        g_cost: 0,
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.pos == goal {
            return reconstruct_path(&came_from, start, goal);
        }

        // Stale entry superseded by a cheaper route
        if g_scores
            .get(&current.pos)
            .is_some_and(|best| current.g_cost > *best)
        {
            continue;
        }

        let tentative_g = current.g_cost + 1;
        for neighbor in grid.walkable_neighbors(current.pos) {
            let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);
            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_scores.insert(neighbor, tentative_g);

                seq += 1;
                open_set.push(PathNode {
                    pos: neighbor,
                    f_cost: tentative_g + neighbor.distance(&goal),
                    g_cost: tentative_g,
                    seq,
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Reconstruct path from came_from map, excluding `start`
fn reconstruct_path(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Does `path` walk from `start` one orthogonal step at a time over walkable cells?
pub fn path_is_valid(grid: &Grid, start: Position, path: &[Position]) -> bool {
    let mut previous = start;
    for step in path {
        if !previous.is_adjacent(step) || !grid.is_walkable(*step) {
            return false;
        }
        previous = *step;
    }
    true
}
