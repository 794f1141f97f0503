use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, GridError, JunctionGraph, Pos, longest_path};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["grid", "graph"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    trails: Grid,
    start: Pos,
    end: Pos,
}

/// The single path tile in `row`.
fn gap(trails: &Grid, row: usize) -> Result<Pos, ParseError> {
    let mut open = (0..trails.cols()).filter(|&col| trails.row(row)[col] == b'.');
    match (open.next(), open.next()) {
        (Some(col), None) => Ok(Pos::new(row, col)),
        (None, _) => Err(GridError::MissingSymbol('.').into()),
        (Some(_), Some(_)) => Err(ParseError::InvalidFormat(format!(
            "row {} has more than one path tile",
            row
        ))),
    }
}

fn slope(symbol: u8) -> Option<Direction> {
    match symbol {
        b'^' => Some(Direction::North),
        b'>' => Some(Direction::East),
        b'v' => Some(Direction::South),
        b'<' => Some(Direction::West),
        _ => None,
    }
}

fn longest_hike(shared: &SharedData, icy: bool) -> Result<String, SolveError> {
    let graph = JunctionGraph::contract(
        &shared.trails,
        shared.start,
        shared.end,
        |c| c != b'#',
        |trails, from, dir| {
            !icy || trails
                .at(from)
                .and_then(slope)
                .is_none_or(|downhill| downhill == dir)
        },
    )?;
    Ok(longest_path(&graph, 0, 1)?.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let trails = Grid::parse(input)?;
        trails.validate(b"#.^>v<")?;
        let start = gap(&trails, 0)?;
        let end = gap(&trails, trails.rows() - 1)?;
        if start == end {
            return Err(ParseError::InvalidFormat(
                "trail map needs separate entry and exit rows".to_string(),
            ));
        }
        Ok(SharedData { trails, start, end })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared, true)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;

    const TRAILS: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#";

    #[test]
    fn test_slippery_slopes() {
        assert_eq!(Solver::solve_input(TRAILS, 1).unwrap(), "94");
    }

    #[test]
    fn test_dry_slopes() {
        assert_eq!(Solver::solve_input(TRAILS, 2).unwrap(), "154");
    }

    #[test]
    fn test_uphill_slope_blocks_the_only_route() {
        let map = "#.#\n#^#\n#.#";
        assert!(Solver::solve_input(map, 1).is_err());
        assert_eq!(Solver::solve_input(map, 2).unwrap(), "2");
    }

    #[test]
    fn test_entry_row_must_have_one_gap() {
        assert!(Solver::parse("#..#\n#..#\n#.##").is_err());
        assert!(Solver::parse("####\n#..#\n#.##").is_err());
    }
}
