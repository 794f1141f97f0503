//! Configuration resolution from CLI args

use crate::cli::{Args, InputSource, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory with puzzle inputs
    pub input_dir: PathBuf,
    /// Inputs each solver runs against, in output order
    pub inputs: Vec<InputSource>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = args.threads.unwrap_or_else(num_cpus);
        if thread_count == 0 {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            inputs: args.input.sources(),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("/tmp/inputs");
        assert_eq!(expand_tilde(plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~")), home);
            assert_eq!(
                expand_tilde(Path::new("~/aoc/inputs")),
                home.join("aoc/inputs")
            );
        }
    }

    #[test]
    fn test_zero_threads_rejected() {
        let args = Args::try_parse_from(["aoc", "--threads", "0"]).unwrap();
        assert!(matches!(Config::from_args(args), Err(CliError::Config(_))));
    }

    #[test]
    fn test_inputs_follow_kind() {
        let args = Args::try_parse_from(["aoc", "--input", "example", "--input-dir", "/data"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.inputs, vec![InputSource::Example]);
        assert_eq!(config.input_dir, PathBuf::from("/data"));
    }
}
