//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Which puzzle inputs to run against
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum InputKind {
    /// The personal puzzle input (default)
    #[default]
    User,
    /// The worked example from the puzzle text
    Example,
    /// The example first, then the personal input
    Both,
}

impl InputKind {
    /// Input sources to run, in output order
    pub fn sources(self) -> Vec<InputSource> {
        match self {
            InputKind::User => vec![InputSource::User],
            InputKind::Example => vec![InputSource::Example],
            InputKind::Both => vec![InputSource::Example, InputSource::User],
        }
    }
}

/// A single input file for a puzzle; examples sort before user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputSource {
    Example,
    User,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Example => f.write_str("example"),
            InputSource::User => f.write_str("input"),
        }
    }
}

/// Advent of Code grid puzzle runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code grid solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}_day{DD}.txt` and `{year}_day{DD}_example.txt`
    #[arg(long, default_value = "~/.cache/aoc_solver/inputs")]
    pub input_dir: PathBuf,

    /// Which inputs to run: user, example, or both
    #[arg(short, long, value_enum, default_value = "user")]
    pub input: InputKind,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.input, InputKind::User);
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert_eq!(args.input_dir, PathBuf::from("~/.cache/aoc_solver/inputs"));
        assert!(args.tags.is_empty());
    }

    #[test]
    fn test_filters_and_tags() {
        let args = Args::try_parse_from([
            "aoc", "-y", "2023", "-d", "17", "-p", "2", "--tags", "grid,search", "--input", "both",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2023));
        assert_eq!(args.day, Some(17));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["grid", "search"]);
        assert_eq!(args.input.sources(), vec![InputSource::Example, InputSource::User]);
    }

    #[test]
    fn test_rejects_out_of_range_day_and_part() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
    }
}
