//! Error types for the CLI

use crate::cli::InputSource;
use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be read
    #[error("Input read failed for {year}/{day} ({input}): {source}")]
    InputRead {
        year: u16,
        day: u8,
        input: InputSource,
        #[source]
        source: InputError,
    },

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one
    /// 1. If first is singular and second is Multiple: prepend first to second's vec
    /// 2. If second is singular and first is Multiple: append second to first's vec
    /// 3. If both are Multiple: concat them
    /// 4. If both are singular: create new Multiple with both
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input-file errors
#[derive(Error, Debug)]
pub enum InputError {
    /// The expected input file does not exist
    #[error("no input file at {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> ArcExecutorError {
        ExecutorError::ChannelSend.into()
    }

    fn count(e: &ArcExecutorError) -> usize {
        match e.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let two = ArcExecutorError::combine(channel(), channel());
        assert_eq!(count(&two), 2);

        let three = ArcExecutorError::combine(two.clone(), channel());
        assert_eq!(count(&three), 3);

        let four = ArcExecutorError::combine(channel(), three);
        assert_eq!(count(&four), 4);

        let six = ArcExecutorError::combine(two.clone(), four);
        assert_eq!(count(&six), 6);
    }

    #[test]
    fn test_combine_opt() {
        assert_eq!(count(&ArcExecutorError::combine_opt(None, channel())), 1);
        assert_eq!(
            count(&ArcExecutorError::combine_opt(Some(channel()), channel())),
            2
        );
    }

    #[test]
    fn test_input_error_mentions_path() {
        let err = InputError::NotFound(PathBuf::from("/inputs/2023_day17.txt"));
        assert!(err.to_string().contains("2023_day17.txt"));
    }
}
