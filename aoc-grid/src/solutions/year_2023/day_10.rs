use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, GridError, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "loop"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Loop tiles in walking order, starting at `S`.
    tiles: Vec<Pos>,
}

/// Headings a pipe symbol connects.
fn connections(symbol: u8) -> &'static [Direction] {
    use Direction::*;
    match symbol {
        b'|' => &[North, South],
        b'-' => &[East, West],
        b'L' => &[North, East],
        b'J' => &[North, West],
        b'7' => &[South, West],
        b'F' => &[South, East],
        _ => &[],
    }
}

/// Walk the pipes from `start` heading `dir` until the walk returns to `start`.
fn walk_loop(grid: &Grid, start: Pos, dir: Direction) -> anyhow::Result<Vec<Pos>> {
    let mut tiles = vec![start];
    let (mut pos, mut dir) = (start, dir);
    loop {
        pos = grid
            .step(pos, dir)
            .ok_or_else(|| anyhow!("pipe at {} leads off the grid", pos))?;
        if pos == start {
            return Ok(tiles);
        }
        if tiles.len() > grid.len() {
            bail!("loop does not close");
        }
        tiles.push(pos);

        let symbol = grid.at(pos).unwrap_or(b'.');
        let from = dir.reverse();
        let pipe = connections(symbol);
        if !pipe.contains(&from) {
            bail!("{:?} at {} does not connect back {:?}", symbol as char, pos, from);
        }
        dir = pipe.iter().copied().find(|&d| d != from).unwrap_or(from);
    }
}

/// The loop through `start`. Stray pipes may also point at `start`, so every
/// connecting neighbour is tried until one walk closes.
fn trace_loop(grid: &Grid, start: Pos) -> anyhow::Result<Vec<Pos>> {
    let exits = grid.neighbors4(start).filter(|&(dir, next)| {
        grid.at(next)
            .is_some_and(|c| connections(c).contains(&dir.reverse()))
    });

    let mut last_error = None;
    for (dir, _) in exits {
        match walk_loop(grid, start, dir) {
            Ok(tiles) => return Ok(tiles),
            Err(e) => last_error = Some(e),
        }
    }
    Err(match last_error {
        Some(e) => e.context(format!("no pipe loop closes at start {}", start)),
        None => anyhow!("start {} connects to no pipes", start),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        grid.validate(b"|-LJ7F.S")?;
        let start = grid.find(b'S').ok_or(GridError::MissingSymbol('S'))?;
        trace_loop(&grid, start)
            .map(|tiles| SharedData { tiles })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.tiles.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(enclosed(&shared.tiles).to_string())
    }
}

/// Interior lattice points of the loop: Pick's theorem over the shoelace area.
fn enclosed(tiles: &[Pos]) -> i64 {
    let twice_area: i64 = tiles
        .iter()
        .zip(tiles.iter().cycle().skip(1))
        .map(|(a, b)| a.row as i64 * b.col as i64 - b.row as i64 * a.col as i64)
        .sum();
    let boundary = tiles.len() as i64;
    (twice_area.abs() - boundary) / 2 + 1
}
