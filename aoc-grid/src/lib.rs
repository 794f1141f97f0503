//! Grid puzzle engine and the Advent of Code 2023 grid solutions built on it
//!
//! [`utils::grid`] holds the reusable engine: grid model, cost-ordered search,
//! cycle detection, junction contraction, beam propagation and tiled
//! reachability. With the `solutions` feature (on by default) the
//! [`solutions`] module adds one solver per grid puzzle, each registered with
//! the solver framework through `AutoRegisterSolver`.

pub mod utils;

#[cfg(feature = "solutions")]
pub mod solutions;
