use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, GridError, Pos, extrapolate_tiled, reachable_after};

/// Gardens smaller than this are the puzzle's worked example, which walks
/// 6 steps instead of 64.
const EXAMPLE_SIDE: usize = 20;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "tiling"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    garden: Grid,
    start: Pos,
    steps: u64,
    tiled_steps: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let garden = Grid::parse(input)?;
        garden.validate(b".#S")?;
        let start = garden.find(b'S').ok_or(GridError::MissingSymbol('S'))?;
        let steps = if garden.rows() < EXAMPLE_SIDE { 6 } else { 64 };
        Ok(SharedData {
            garden,
            start,
            steps,
            tiled_steps: 26_501_365,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reachable_after(&shared.garden, shared.start, shared.steps)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(extrapolate_tiled(&shared.garden, shared.start, shared.tiled_steps)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{SolverError, SolverExt};

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

    const FIELD: &str = "\
...
.S.
...";

    #[test]
    fn test_example_walk() {
        assert_eq!(Solver::solve_input(GARDEN, 1).unwrap(), "16");
    }

    #[test]
    fn test_short_tiled_walks() {
        let mut shared = Solver::parse(GARDEN).unwrap();
        for (steps, expected) in [(6, "16"), (10, "50")] {
            shared.tiled_steps = steps;
            assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), expected);
        }
    }

    #[test]
    fn test_open_field_full_distance() {
        assert_eq!(
            Solver::solve_input(FIELD, 2).unwrap(),
            (26_501_366u64 * 26_501_366).to_string()
        );
    }

    #[test]
    fn test_example_garden_has_no_tiled_answer() {
        assert!(matches!(
            Solver::solve_input(GARDEN, 2),
            Err(SolverError::SolveError(SolveError::SolveFailed(_)))
        ));
    }

    #[test]
    fn test_missing_start() {
        assert!(Solver::parse("...\n.#.").is_err());
    }
}
