use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{BestFirst, Grid, Pos, RunLimitedWalk};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "search"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        // Every block must be a heat-loss digit.
        grid.digits()?;
        Ok(grid)
    }
}

/// Least heat lost from the top-left to the bottom-right block.
fn min_heat_loss(grid: &Grid, min_run: u8, max_run: u8) -> Result<String, SolveError> {
    let end = Pos::new(grid.rows() - 1, grid.cols() - 1);
    let walk = RunLimitedWalk::new(grid, Pos::new(0, 0), end, min_run, max_run)?;
    let outcome = BestFirst::new(walk).run()?;
    Ok(outcome.cost.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(grid: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_heat_loss(grid, 1, 3)
    }
}

impl PartSolver<2> for Solver {
    fn solve(grid: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_heat_loss(grid, 4, 10)
    }
}
