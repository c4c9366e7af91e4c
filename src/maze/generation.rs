//! Maze generation
//!
//! Randomized backtracking carve from a fixed start cell, then a pass that
//! knocks out a fraction of interior walls to add loops. Fully deterministic
//! for a given seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::constants::{MAZE_START, MIN_MAZE_DIMENSION};
use crate::core::error::{MazeError, Result};
use crate::core::types::{Direction, Position};
use crate::maze::grid::{Grid, Terrain};

/// Generate a maze of `width` columns by `height` rows
///
/// Both dimensions must be odd and at least 3 so that carved cells sit on odd
/// coordinates with a wall between each pair.
pub fn generate_maze(
    width: usize,
    height: usize,
    seed: u64,
    extra_opening_fraction: f64,
) -> Result<Grid> {
    validate_dimensions(width, height)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::new(width, height);

    carve_passages(&mut grid, MAZE_START, &mut rng);
    let opened = add_extra_openings(&mut grid, extra_opening_fraction, &mut rng);

    tracing::info!(
        "Generated {}x{} maze (seed {}), {} extra openings",
        width,
        height,
        seed,
        opened
    );

    Ok(grid)
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    let valid = |d: usize| d >= MIN_MAZE_DIMENSION && d % 2 == 1;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { width, height })
    }
}

/// Is `pos` strictly inside the border?
fn is_interior(grid: &Grid, pos: Position) -> bool {
    grid.in_bounds(pos) && !grid.is_border(pos)
}

/// Depth-first carve with an explicit stack
///
/// From the cell on top of the stack, pick a random direction whose cell two
/// steps away is still wall; carve the wall between and the target, push the
/// target. When no such direction remains, backtrack.
fn carve_passages(grid: &mut Grid, start: Position, rng: &mut ChaCha8Rng) {
    grid.set(start, Terrain::Open);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| {
                let target = current.step(*dir).step(*dir);
                is_interior(grid, target) && grid.is_wall(target)
            })
            .collect();

        let Some(&dir) = candidates.choose(rng) else {
            stack.pop();
            continue;
        };

        let between = current.step(dir);
        let target = between.step(dir);
        grid.set(between, Terrain::Open);
        grid.set(target, Terrain::Open);
        stack.push(target);
    }
}

/// Flip a fraction of the remaining interior walls to open
///
/// A wall only opens once it touches a walkable cell, so every new cell joins
/// the connected maze. Walls skipped for that reason are retried after the
/// rest. Border cells are never touched. Returns the number opened.
fn add_extra_openings(grid: &mut Grid, fraction: f64, rng: &mut ChaCha8Rng) -> usize {
    let mut pending: Vec<Position> = grid
        .cells_of(Terrain::Wall)
        .filter(|p| !grid.is_border(*p))
        .collect();

    let count = ((pending.len() as f64) * fraction.clamp(0.0, 1.0)).round() as usize;
    if count == 0 {
        return 0;
    }
    pending.shuffle(rng);

    let mut opened = 0;
    while opened < count {
        let before = opened;
        let mut deferred = Vec::new();
        for pos in pending {
            if opened == count {
                break;
            }
            if grid.walkable_neighbors(pos).next().is_some() {
                grid.set(pos, Terrain::Open);
                opened += 1;
            } else {
                deferred.push(pos);
            }
        }
        if opened == before {
            break;
        }
        pending = deferred;
    }

    opened
}

/// Roll a fresh seed for callers that don't care about reproducibility
pub fn random_seed() -> u64 {
    rand::thread_rng().gen()
}
