//! Advent of Code Solver Library
//!
//! A small, type-safe framework for puzzle solvers. Each solver parses its
//! input once into shared data and answers any number of parts from it.
//!
//! # Overview
//!
//! - [`AocParser`] turns raw text into the solver's shared data
//! - [`PartSolver<N>`](PartSolver) answers one part
//! - [`Solver`] dispatches a runtime part number to the right [`PartSolver`];
//!   `#[derive(AocSolver)]` writes this impl for you
//! - [`SolverRegistryBuilder`] / [`SolverRegistry`] map (year, day) to a factory
//! - `#[derive(AutoRegisterSolver)]` submits a solver to the plugin inventory
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverExt};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Plots;
//!
//! impl AocParser for Plots {
//!     type SharedData<'a> = Vec<&'a str>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         Ok(input.lines().collect())
//!     }
//! }
//!
//! impl PartSolver<1> for Plots {
//!     fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(rows.iter().map(|r| r.matches('.').count()).sum::<usize>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Plots {
//!     fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(rows.iter().map(|r| r.matches('#').count()).sum::<usize>().to_string())
//!     }
//! }
//!
//! assert_eq!(Plots::solve_input("..#\n#..", 1).unwrap(), "4");
//! assert_eq!(Plots::solve_input("..#\n#..", 2).unwrap(), "2");
//! ```
//!
//! # Part Dependencies
//!
//! Parts receive `&mut SharedData`, so a part can cache intermediate work in
//! the shared data for later parts to reuse.

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
