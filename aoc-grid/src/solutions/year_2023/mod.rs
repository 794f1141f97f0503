//! Advent of Code 2023 grid puzzles.

pub mod day_10;
pub mod day_14;
pub mod day_16;
pub mod day_17;
pub mod day_21;
pub mod day_23;
