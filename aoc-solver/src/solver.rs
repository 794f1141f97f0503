//! Core solver traits

use crate::error::{ParseError, SolveError, SolverError};

/// Parses raw puzzle text into the data shared by every part of a solver.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Rocks;
///
/// impl AocParser for Rocks {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         let rows: Vec<&str> = input.lines().collect();
///         if rows.is_empty() {
///             return Err(ParseError::MissingData("empty grid".into()));
///         }
///         Ok(rows)
///     }
/// }
///
/// assert_eq!(Rocks::parse("O.#\n..O").unwrap().len(), 2);
/// ```
pub trait AocParser {
    /// The structure holding parsed input and anything cached between parts.
    ///
    /// Owned data (`Vec<T>`, custom structs) or borrowed slices of the input
    /// (`&'a str`) both work.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement once per part; `#[derive(AocSolver)]` generates the [`Solver`]
/// impl that dispatches to these.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Walls;
///
/// impl AocParser for Walls {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl PartSolver<1> for Walls {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.bytes().filter(|&b| b == b'#').count().to_string())
///     }
/// }
///
/// let mut data = Walls::parse("#.#\n.#.").unwrap();
/// assert_eq!(<Walls as PartSolver<1>>::solve(&mut data).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle using (and possibly caching into) `shared`.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Core trait that all Advent of Code solvers implement.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Floor;
///
/// impl AocParser for Floor {
///     type SharedData<'a> = Vec<Vec<u8>>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().map(|l| l.bytes().collect()).collect())
///     }
/// }
///
/// impl Solver for Floor {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.len().to_string()),
///             2 => Ok(shared.first().map_or(0, Vec::len).to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut grid = Floor::parse("...\n...").unwrap();
/// assert_eq!(Floor::solve_part(&mut grid, 1).unwrap(), "2");
/// assert_eq!(Floor::solve_part(&mut grid, 2).unwrap(), "3");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem.
    ///
    /// Returns `SolveError::PartNotImplemented` for parts the solver does not know.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Extension methods available on every [`Solver`].
pub trait SolverExt: Solver {
    /// Solve a part after checking that it lies within `1..=PARTS`.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }

    /// Parse `input` and solve a single part in one go.
    ///
    /// This is the one-shot entry point for callers that do not need the
    /// registry: `solve_input(input, 2)` answers "part 2 of this input".
    fn solve_input(input: &str, part: u8) -> Result<String, SolverError> {
        let mut shared = Self::parse(input)?;
        Ok(Self::solve_part_checked_range(&mut shared, part)?)
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
