use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{CycleDetector, Direction, Grid, Pos};

const ROUND: u8 = b'O';
const EMPTY: u8 = b'.';
const SPIN: [Direction; 4] = [
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    platform: Grid,
    spins: u64,
    detector: CycleDetector,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let platform = Grid::parse(input)?;
        platform.validate(b"O#.")?;
        Ok(SharedData {
            platform,
            spins: 1_000_000_000,
            detector: CycleDetector::fingerprint(),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.platform.clone();
        tilt(&mut platform, Direction::North);
        Ok(north_load(&platform).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let load = shared.detector.value_at(
            shared.platform.clone(),
            |platform| {
                let mut next = platform.clone();
                for dir in SPIN {
                    tilt(&mut next, dir);
                }
                next
            },
            north_load,
            shared.spins,
        );
        Ok(load.to_string())
    }
}

/// Cells of lane `k`, starting from the edge rocks roll toward.
fn lane(platform: &Grid, dir: Direction, k: usize) -> Vec<Pos> {
    let (rows, cols) = (platform.rows(), platform.cols());
    match dir {
        Direction::North => (0..rows).map(|r| Pos::new(r, k)).collect(),
        Direction::South => (0..rows).rev().map(|r| Pos::new(r, k)).collect(),
        Direction::West => (0..cols).map(|c| Pos::new(k, c)).collect(),
        Direction::East => (0..cols).rev().map(|c| Pos::new(k, c)).collect(),
    }
}

/// Roll every round rock as far as it goes toward `dir`.
fn tilt(platform: &mut Grid, dir: Direction) {
    let lanes = if dir.is_vertical() {
        platform.cols()
    } else {
        platform.rows()
    };
    for k in 0..lanes {
        let cells = lane(platform, dir, k);
        let mut free = 0;
        for (i, &pos) in cells.iter().enumerate() {
            match platform.at(pos) {
                Some(ROUND) => {
                    if i != free {
                        set(platform, cells[free], ROUND);
                        set(platform, pos, EMPTY);
                    }
                    free += 1;
                }
                Some(EMPTY) => {}
                _ => free = i + 1,
            }
        }
    }
}

fn set(platform: &mut Grid, pos: Pos, symbol: u8) {
    if let Some(cell) = platform.get_mut(pos) {
        *cell = symbol;
    }
}

/// Each round rock weighs its distance from the south edge, counting its own row.
fn north_load(platform: &Grid) -> u64 {
    platform
        .positions()
        .filter(|&p| platform.at(p) == Some(ROUND))
        .map(|p| (platform.rows() - p.row) as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid::DEFAULT_STREAK;
    use aoc_solver::SolverExt;

    const PLATFORM: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....";

    #[test]
    fn test_single_tilt() {
        assert_eq!(Solver::solve_input(PLATFORM, 1).unwrap(), "136");
    }

    #[test]
    fn test_billion_spins() {
        assert_eq!(Solver::solve_input(PLATFORM, 2).unwrap(), "64");
    }

    #[test]
    fn test_one_spin_layout() {
        let mut platform = Grid::parse(PLATFORM).unwrap();
        for dir in SPIN {
            tilt(&mut platform, dir);
        }
        let expected = "\
.....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....";
        assert_eq!(platform.to_string(), expected);
    }

    #[test]
    fn test_streak_detector_agrees() {
        let mut shared = Solver::parse(PLATFORM).unwrap();
        shared.spins = 10_002;
        let exact = <Solver as PartSolver<2>>::solve(&mut shared).unwrap();

        shared.detector = CycleDetector::metric_streak(DEFAULT_STREAK).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), exact);
    }

    #[test]
    fn test_rejects_unknown_rocks() {
        assert!(Solver::parse("O.#\n.X.").is_err());
    }
}
