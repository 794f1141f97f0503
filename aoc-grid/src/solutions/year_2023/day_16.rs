use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::grid::{Beam, Direction, Grid, GridError, Pos, edge_entries, energize};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "beam", "parallel"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        grid.validate(br"./\|-")?;
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(grid: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = Beam::new(Pos::new(0, 0), Direction::East);
        Ok(energize(grid, start).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(grid: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &*grid;
        edge_entries(grid)
            .into_par_iter()
            .map(|entry| energize(grid, entry))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| GridError::NoSolution("grid has no border".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid::energize_parallel;
    use aoc_solver::SolverExt;

    const CONTRAPTION: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn test_top_left_entry() {
        assert_eq!(Solver::solve_input(CONTRAPTION, 1).unwrap(), "46");
    }

    #[test]
    fn test_best_edge_entry() {
        assert_eq!(Solver::solve_input(CONTRAPTION, 2).unwrap(), "51");
    }

    #[test]
    fn test_parallel_tracing_per_entry() {
        let grid = Solver::parse(CONTRAPTION).unwrap();
        for entry in edge_entries(&grid) {
            assert_eq!(energize_parallel(&grid, entry), energize(&grid, entry));
        }
    }

    #[test]
    fn test_corner_mirror_turns_first_beam() {
        // The first cell's mirror sends the beam south immediately.
        assert_eq!(Solver::solve_input("\\..\n...\n...", 1).unwrap(), "3");
    }
}
