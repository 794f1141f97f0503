//! Step-exact reachability on bounded and infinitely tiled grids.

use std::collections::{HashSet, VecDeque};

use log::debug;

use super::error::GridError;
use super::model::{Direction, Grid, Pos};

const ROCK: u8 = b'#';

/// Breadth-first step counts from `start` to every cell, `None` where
/// unreachable.
pub fn bfs_distances(grid: &Grid, start: Pos, passable: impl Fn(u8) -> bool) -> Vec<Option<u64>> {
    let mut dist = vec![None; grid.len()];
    if !grid.at(start).is_some_and(&passable) {
        return dist;
    }
    dist[grid.index(start)] = Some(0);
    let mut queue = VecDeque::from([(start, 0u64)]);

    while let Some((pos, d)) = queue.pop_front() {
        for (_, next) in grid.neighbors4(pos) {
            let i = grid.index(next);
            if dist[i].is_none() && grid.at(next).is_some_and(&passable) {
                dist[i] = Some(d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }
    dist
}

fn check_start(grid: &Grid, start: Pos) -> Result<(), GridError> {
    match grid.at(start) {
        Some(ROCK) => Err(GridError::InvalidParameter(format!("start {} is a rock", start))),
        Some(_) => Ok(()),
        None => Err(GridError::InvalidParameter(format!(
            "start {} lies outside the grid",
            start
        ))),
    }
}

/// Cells where a walk of exactly `steps` moves from `start` can end.
///
/// Moves may revisit cells, so a cell qualifies when it is at most `steps`
/// away and its distance has the same parity as `steps`.
pub fn reachable_after(grid: &Grid, start: Pos, steps: u64) -> Result<u64, GridError> {
    check_start(grid, start)?;
    let count = bfs_distances(grid, start, |c| c != ROCK)
        .into_iter()
        .flatten()
        .filter(|&d| d <= steps && d % 2 == steps % 2)
        .count();
    Ok(count as u64)
}

/// [`reachable_after`] on `grid` repeated infinitely in every direction.
pub fn reachable_after_tiled(grid: &Grid, start: Pos, steps: u64) -> Result<u64, GridError> {
    check_start(grid, start)?;
    let origin = (start.row as i64, start.col as i64);
    let mut seen = HashSet::from([origin]);
    let mut layer = vec![origin];
    let mut count = u64::from(steps % 2 == 0);

    for d in 1..=steps {
        let mut next_layer = Vec::new();
        for &(row, col) in &layer {
            for dir in Direction::ALL {
                let (dr, dc) = dir.delta();
                let next = (row + dr as i64, col + dc as i64);
                if grid.at_wrapped(next.0, next.1) != ROCK && seen.insert(next) {
                    next_layer.push(next);
                }
            }
        }
        if next_layer.is_empty() {
            break;
        }
        if d % 2 == steps % 2 {
            count += next_layer.len() as u64;
        }
        layer = next_layer;
    }
    Ok(count)
}

/// Value at `n` of the quadratic through `(0, y0)`, `(1, y1)`, `(2, y2)`.
///
/// ```rust
/// use aoc_grid::utils::grid::quadratic_extrapolate;
///
/// // n^2 + 1
/// assert_eq!(quadratic_extrapolate([1, 2, 5], 10), 101);
/// ```
pub fn quadratic_extrapolate(samples: [i64; 3], n: i64) -> i64 {
    let [y0, y1, y2] = samples;
    let d1 = y1 - y0;
    let d2 = y2 - 2 * y1 + y0;
    y0 + n * d1 + n * (n - 1) / 2 * d2
}

/// Conditions under which the frontier grows as a clean diamond across
/// tiles: a square tile with odd side, the start in its centre, a rock-free
/// start row and column, and `steps` ending on a tile boundary.
fn check_diamond(grid: &Grid, start: Pos, steps: u64) -> Result<(), GridError> {
    let side = grid.rows();
    let fail = |why: String| Err(GridError::InvalidParameter(why));
    if grid.cols() != side {
        return fail(format!(
            "tiled extrapolation needs a square grid, got {}x{}",
            grid.rows(),
            grid.cols()
        ));
    }
    if side % 2 == 0 || start != Pos::new(side / 2, side / 2) {
        return fail(format!("start {} is not the centre of a {}x{} tile", start, side, side));
    }
    if grid.row(start.row).contains(&ROCK) {
        return fail(format!("start row {} has rocks", start.row));
    }
    if (0..side).any(|row| grid.row(row)[start.col] == ROCK) {
        return fail(format!("start column {} has rocks", start.col));
    }
    if steps % side as u64 != (side / 2) as u64 {
        return fail(format!(
            "{} steps do not end on a tile boundary (side {})",
            steps, side
        ));
    }
    Ok(())
}

/// [`reachable_after_tiled`] for step counts too large to flood directly.
///
/// Growth is sampled at the three step counts congruent to `steps` modulo
/// the tile side and extended quadratically. Walks shorter than three tiles
/// are flooded directly. Longer walks need an odd square tile with the start
/// in its centre, rock-free start row and column, and `steps` ending on a
/// tile boundary; anything else is [`GridError::InvalidParameter`].
pub fn extrapolate_tiled(grid: &Grid, start: Pos, steps: u64) -> Result<u64, GridError> {
    check_start(grid, start)?;
    let side = grid.rows() as u64;
    let (n, rem) = (steps / side, steps % side);
    if n < 3 {
        return reachable_after_tiled(grid, start, steps);
    }
    check_diamond(grid, start, steps)?;

    let mut samples = [0i64; 3];
    for (k, sample) in samples.iter_mut().enumerate() {
        *sample = reachable_after_tiled(grid, start, rem + k as u64 * side)? as i64;
    }
    debug!(
        "tiled samples {:?} at {} + k*{}, extrapolating to n = {}",
        samples, rem, side, n
    );
    Ok(quadratic_extrapolate(samples, n as i64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARDEN: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    fn garden() -> (Grid, Pos) {
        let grid = Grid::parse(GARDEN).unwrap();
        let start = grid.find(b'S').unwrap();
        (grid, start)
    }

    #[test]
    fn test_bounded_garden() {
        let (grid, start) = garden();
        assert_eq!(reachable_after(&grid, start, 6).unwrap(), 16);
    }

    #[test]
    fn test_tiled_garden() {
        let (grid, start) = garden();
        for (steps, expected) in [(6, 16), (10, 50), (50, 1594), (100, 6536)] {
            assert_eq!(reachable_after_tiled(&grid, start, steps).unwrap(), expected);
        }
    }

    #[test]
    fn test_open_field_extrapolation() {
        // On an open plane exactly (k + 1)^2 cells end a walk of k moves.
        let grid = Grid::filled(5, 5, b'.');
        let start = Pos::new(2, 2);
        assert_eq!(reachable_after_tiled(&grid, start, 52).unwrap(), 53 * 53);
        assert_eq!(extrapolate_tiled(&grid, start, 52).unwrap(), 53 * 53);
        assert_eq!(extrapolate_tiled(&grid, start, 1_002).unwrap(), 1_003 * 1_003);
    }

    #[test]
    fn test_extrapolation_refuses_unclean_tiles() {
        let (grid, start) = garden();
        // Rocks in the start row bend the frontier away from a diamond
        for steps in [500, 1_000, 26_501_365] {
            assert!(matches!(
                extrapolate_tiled(&grid, start, steps),
                Err(GridError::InvalidParameter(_))
            ));
        }
        // Short walks are still flooded exactly
        assert_eq!(extrapolate_tiled(&grid, start, 10).unwrap(), 50);

        let field = Grid::filled(5, 5, b'.');
        let off_centre = extrapolate_tiled(&field, Pos::new(1, 2), 52);
        assert!(matches!(off_centre, Err(GridError::InvalidParameter(_))));
        let off_boundary = extrapolate_tiled(&field, Pos::new(2, 2), 1_001);
        assert!(matches!(off_boundary, Err(GridError::InvalidParameter(_))));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let grid = Grid::parse("...\n.#.").unwrap();
        assert!(extrapolate_tiled(&grid, Pos::new(0, 0), 100).is_err());
        assert!(reachable_after(&grid, Pos::new(1, 1), 3).is_err());
        assert!(reachable_after(&grid, Pos::new(4, 0), 3).is_err());
    }

    #[test]
    fn test_quadratic_through_samples() {
        let f = |x: i64| 3 * x * x - 7 * x + 11;
        for n in [0, 1, 2, 5, 202_300] {
            assert_eq!(quadratic_extrapolate([f(0), f(1), f(2)], n), f(n));
        }
    }
}
