//! Placing the finish, agent spawns and pawn patrol routes on a carved maze

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::core::constants::MIN_SPAWN_DISTANCE;
use crate::core::error::{MazeError, Result};
use crate::core::types::Position;
use crate::maze::grid::{Grid, Terrain};

/// Mark the open cell farthest (by walking distance) from `start` as the finish
///
/// Ties are broken by row-major order so the choice is stable.
pub fn place_finish(grid: &mut Grid, start: Position) -> Result<Position> {
    let distances = grid.distances_from(start);

    let finish = grid
        .positions()
        .filter(|p| *p != start)
        .filter_map(|p| distances.get(&p).map(|d| (p, *d)))
        .fold(None, |best: Option<(Position, u32)>, (p, d)| match best {
            Some((_, best_d)) if best_d >= d => best,
            _ => Some((p, d)),
        })
        .map(|(p, _)| p)
        .ok_or_else(|| MazeError::Placement("no open cell for the finish".into()))?;

    grid.set(finish, Terrain::Finish);
    Ok(finish)
}

/// Pick `count` distinct open spawn cells
///
/// Spawns never land on the finish, the player start or anything in
/// `exclude`. Cells at least `MIN_SPAWN_DISTANCE` from `start` are preferred;
/// closer cells are only used when the maze is too small to honor that.
pub fn spawn_points(
    grid: &Grid,
    start: Position,
    exclude: &[Position],
    count: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Position>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let (mut far, mut near): (Vec<Position>, Vec<Position>) = grid
        .cells_of(Terrain::Open)
        .filter(|p| *p != start && !exclude.contains(p))
        .partition(|p| p.distance(&start) >= MIN_SPAWN_DISTANCE);

    if far.len() + near.len() < count {
        return Err(MazeError::Placement(format!(
            "need {} spawn cells, maze only has {}",
            count,
            far.len() + near.len()
        )));
    }

    far.shuffle(rng);
    near.shuffle(rng);

    Ok(far.into_iter().chain(near).take(count).collect())
}

/// Build a closed patrol route starting at `spawn`
///
/// Walks up to `steps` cells outward without revisiting, avoiding `avoid`,
/// then returns along the same corridor. The route is cyclic: after its last
/// entry the pawn continues from the first. A boxed-in pawn gets a single-cell
/// route and stands guard.
pub fn patrol_route(
    grid: &Grid,
    spawn: Position,
    steps: usize,
    avoid: &[Position],
    rng: &mut ChaCha8Rng,
) -> Vec<Position> {
    let mut outbound = vec![spawn];
    let mut current = spawn;

    for _ in 0..steps {
        let options: Vec<Position> = grid
            .walkable_neighbors(current)
            .filter(|n| !outbound.contains(n) && !avoid.contains(n))
            .collect();

        let Some(&next) = options.choose(rng) else {
            break;
        };
        outbound.push(next);
        current = next;
    }

    // There and back again, without repeating either endpoint
    let inbound: Vec<Position> = outbound
        .iter()
        .rev()
        .skip(1)
        .take(outbound.len().saturating_sub(2))
        .copied()
        .collect();
    outbound.extend(inbound);
    outbound
}
