//! Puzzle solutions organised by year.

pub mod year_2023;
