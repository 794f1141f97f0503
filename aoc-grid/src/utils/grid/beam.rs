//! Light beams bouncing through mirrors and splitters.
//!
//! A beam moves one cell per step in its heading. `/` and `\` reflect it,
//! `|` and `-` split it in two when it hits the flat side and let it pass when
//! it hits the pointy end, and every other symbol is empty space. A cell is
//! energized once any beam has passed through it.

use std::sync::atomic::{AtomicU8, Ordering};

use super::model::{Direction, Grid, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beam {
    pub pos: Pos,
    pub dir: Direction,
}

impl Beam {
    pub const fn new(pos: Pos, dir: Direction) -> Self {
        Self { pos, dir }
    }
}

/// Headings leaving a cell holding `symbol` for a beam arriving with `dir`.
pub fn outgoing(symbol: u8, dir: Direction) -> (Direction, Option<Direction>) {
    use Direction::*;
    match (symbol, dir) {
        (b'/', East) => (North, None),
        (b'/', North) => (East, None),
        (b'/', West) => (South, None),
        (b'/', South) => (West, None),
        (b'\\', East) => (South, None),
        (b'\\', South) => (East, None),
        (b'\\', West) => (North, None),
        (b'\\', North) => (West, None),
        (b'|', East | West) => (North, Some(South)),
        (b'-', North | South) => (East, Some(West)),
        _ => (dir, None),
    }
}

/// Number of cells energized by `beam` entering at its position.
///
/// An entry outside the grid energizes nothing.
pub fn energize(grid: &Grid, beam: Beam) -> usize {
    if !grid.contains(beam.pos) {
        return 0;
    }
    let mut seen = vec![0u8; grid.len()];
    let mut queue = vec![beam];

    while let Some(Beam { pos, dir }) = queue.pop() {
        let mark = &mut seen[grid.index(pos)];
        if *mark & dir.bit() != 0 {
            continue;
        }
        *mark |= dir.bit();

        let Some(symbol) = grid.at(pos) else {
            continue;
        };
        let (first, second) = outgoing(symbol, dir);
        for next_dir in std::iter::once(first).chain(second) {
            if let Some(next) = grid.step(pos, next_dir) {
                queue.push(Beam::new(next, next_dir));
            }
        }
    }

    seen.iter().filter(|&&m| m != 0).count()
}

/// [`energize`] with split branches traced concurrently.
///
/// Each cell carries an atomic heading mask; whichever branch sets a heading
/// bit first continues and the others stop there. The count is taken after
/// every spawned branch has joined.
pub fn energize_parallel(grid: &Grid, beam: Beam) -> usize {
    if !grid.contains(beam.pos) {
        return 0;
    }
    let marks: Vec<AtomicU8> = (0..grid.len()).map(|_| AtomicU8::new(0)).collect();
    rayon::scope(|scope| trace_beam(scope, grid, &marks, beam));

    marks
        .iter()
        .filter(|m| m.load(Ordering::Relaxed) != 0)
        .count()
}

fn trace_beam<'s>(scope: &rayon::Scope<'s>, grid: &'s Grid, marks: &'s [AtomicU8], beam: Beam) {
    let Beam { mut pos, mut dir } = beam;
    loop {
        let previous = marks[grid.index(pos)].fetch_or(dir.bit(), Ordering::Relaxed);
        if previous & dir.bit() != 0 {
            return;
        }
        let Some(symbol) = grid.at(pos) else {
            return;
        };

        let (first, second) = outgoing(symbol, dir);
        if let Some(split) = second
            && let Some(next) = grid.step(pos, split)
        {
            scope.spawn(move |s| trace_beam(s, grid, marks, Beam::new(next, split)));
        }
        match grid.step(pos, first) {
            Some(next) => {
                pos = next;
                dir = first;
            }
            None => return,
        }
    }
}

/// Every beam entering the grid from its border, heading inward.
///
/// Corners appear twice, once per inward heading.
pub fn edge_entries(grid: &Grid) -> Vec<Beam> {
    let (rows, cols) = (grid.rows(), grid.cols());
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let mut entries = Vec::with_capacity(2 * (rows + cols));
    for row in 0..rows {
        entries.push(Beam::new(Pos::new(row, 0), Direction::East));
        entries.push(Beam::new(Pos::new(row, cols - 1), Direction::West));
    }
    for col in 0..cols {
        entries.push(Beam::new(Pos::new(0, col), Direction::South));
        entries.push(Beam::new(Pos::new(rows - 1, col), Direction::North));
    }
    entries
}
