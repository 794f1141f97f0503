//! Constrained Grid Search Engine
//!
//! Building blocks for puzzles played out on a 2D character grid.
//!
//! # Components
//!
//! - [`Grid`], [`Pos`], [`Direction`]: the board, with bounds checking as a
//!   first-class outcome (`at` returns `Option`) and fixed N, E, S, W neighbour order
//! - [`BestFirst`]: cost-ordered search over any [`SearchProblem`], with lazy
//!   deletion and an explicit [`GridError::NoSolution`] on exhaustion
//! - [`RunLimitedWalk`]: digit-cost walk whose straight runs are bounded above and below
//! - [`CycleDetector`]: answers "metric after K steps" for huge K by finding the period
//! - [`JunctionGraph`]: contracts corridors so [`longest_path`] stays tractable
//! - [`energize`] / [`energize_parallel`]: beam propagation through mirrors and splitters
//! - [`reachable_after_tiled`] / [`extrapolate_tiled`]: reachability on an infinite tiling
//!
//! # Example: run-limited walk
//!
//! ```rust
//! use aoc_grid::utils::grid::{BestFirst, Grid, Pos, RunLimitedWalk};
//!
//! let grid = Grid::parse("111\n111\n111").unwrap();
//! let walk = RunLimitedWalk::new(&grid, Pos::new(0, 0), Pos::new(2, 2), 0, 3).unwrap();
//! assert_eq!(BestFirst::new(walk).run().unwrap().cost, 4);
//! ```
//!
//! # Example: corridor contraction
//!
//! ```rust
//! use aoc_grid::utils::grid::{Grid, JunctionGraph, Pos, longest_path};
//!
//! let grid = Grid::parse("#.###\n#...#\n#.#.#\n#...#\n###.#").unwrap();
//! let graph = JunctionGraph::contract(
//!     &grid,
//!     Pos::new(0, 1),
//!     Pos::new(4, 3),
//!     |c| c != b'#',
//!     |_, _, _| true,
//! )
//! .unwrap();
//! assert_eq!(longest_path(&graph, 0, 1).unwrap(), 6);
//! ```

mod beam;
mod cycle;
mod error;
mod junction;
mod model;
mod paths;
mod search;
mod tiling;

pub use beam::{Beam, edge_entries, energize, energize_parallel, outgoing};
pub use cycle::{CycleDetector, DEFAULT_STREAK};
pub use error::GridError;
pub use junction::{Edge, JunctionGraph};
pub use model::{Direction, Grid, Pos};
pub use paths::{longest_path, shortest_path};
pub use search::{BestFirst, ClosureSearch, Heading, RunLimitedWalk, SearchOutcome, SearchProblem};
pub use tiling::{
    bfs_distances, extrapolate_tiled, quadratic_extrapolate, reachable_after,
    reachable_after_tiled,
};
