//! Parallel executor for running solvers

use crate::cli::{InputSource, ParallelizeBy};
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, warn};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub input: InputSource,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    pub solve_duration: TimeDelta,
    /// None when the input never made it through parsing
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a solver to execute against one input
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub input: InputSource,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    sources: Vec<InputSource>,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                sources: config.inputs.clone(),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Input files backing the work items
    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata, ordered by
    /// year, day, then input
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .flat_map(|info| {
                let parts = filter_parts(cfg.part_filter, info.parts);
                cfg.sources.iter().map(move |&input| WorkItem {
                    year: info.year,
                    day: info.day,
                    input,
                    parts: parts.clone(),
                })
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            "executing {} work item(s) by {:?}",
            work_items.len(),
            self.sync_executor_config.parallelize_by
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally fans out inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, sync_executor_config).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Restrict a solver's parts to the part filter; empty when the filter is
/// beyond what the solver has
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

/// Rebuild an error so each requested part gets its own copy
fn per_part_error(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        SolverError::InvalidYearDay(year, day) => SolverError::InvalidYearDay(*year, *day),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        other => SolverError::ParseError(ParseError::Other(other.to_string())),
    }
}

/// Create a result for a part that never reached its solver
fn make_error_result(work: &WorkItem, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        input: work.input,
        part,
        answer: Err(error),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
    }
}

fn send_result(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send one error result for every part of the work item
fn send_error_results(
    work: &WorkItem,
    error: &SolverError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send_result(tx, make_error_result(work, part, per_part_error(error)))?;
    }
    Ok(())
}

/// Read the input for a work item and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match read_input(work, &sync_executor_config.inputs) {
        Ok(input) => input,
        Err(e) => {
            warn!("{}", e);
            let error = SolverError::ParseError(ParseError::MissingData(e.to_string()));
            return send_error_results(work, &error, tx);
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_solver_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_solver_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

fn read_input(work: &WorkItem, inputs: &InputStore) -> Result<String, ExecutorError> {
    inputs
        .read(work.year, work.day, work.input)
        .map_err(|source| ExecutorError::InputRead {
            year: work.year,
            day: work.day,
            input: work.input,
            source,
        })
}

/// Run solver with part-level parallelism, buffering results to emit in order.
/// Every part parses its own copy of the input.
fn run_solver_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(work.year, work.day, input) {
                Ok(mut solver) => solve_part(work, part, &mut *solver),
                Err(e) => make_error_result(work, part, e),
            };
            rtx.send(result).ok();
        });

    let mut buffer: Vec<Option<SolverResult>> = work.parts.clone().map(|_| None).collect();
    let start_part = *work.parts.start();
    let mut next_part = start_part;

    for result in result_rx {
        if let Some(slot) = buffer.get_mut((result.part - start_part) as usize) {
            *slot = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            send_result(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Parse once and solve the parts in order on a scoped thread, forwarding
/// results as they arrive
fn run_solver_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();
    std::thread::scope(|s| {
        s.spawn(move || {
            let mut solver = match registry.create_solver(work.year, work.day, input) {
                Ok(solver) => solver,
                Err(e) => {
                    for part in work.parts.clone() {
                        let result = make_error_result(work, part, per_part_error(&e));
                        if solve_tx.send(result).is_err() {
                            break;
                        }
                    }
                    return;
                }
            };
            for part in work.parts.clone() {
                if solve_tx
                    .send(solve_part(work, part, &mut *solver))
                    .is_err()
                {
                    break;
                }
            }
        });

        for result in solve_rx {
            send_result(tx, result)?
        }
        Ok(())
    })
}

fn solve_part(work: &WorkItem, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(solved) => {
            let duration = solved.duration();
            (Ok(solved.answer), duration)
        }
        Err(e) => (Err(e.into()), TimeDelta::zero()),
    };

    SolverResult {
        year: work.year,
        day: work.day,
        input: work.input,
        part,
        answer,
        solve_duration,
        parse_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{AocParser, AocSolver, PartSolver, SolveError, SolverRegistryBuilder};
    use std::fs;
    use tempfile::TempDir;

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct LineCount;

    impl AocParser for LineCount {
        type SharedData<'a> = Vec<&'a str>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.trim().is_empty() {
                return Err(ParseError::MissingData("no lines".to_string()));
            }
            Ok(input.lines().collect())
        }
    }

    impl PartSolver<1> for LineCount {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.len().to_string())
        }
    }

    impl PartSolver<2> for LineCount {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string())
        }
    }

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 3)]
    struct ThreeParts;

    impl AocParser for ThreeParts {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Ok(input)
        }
    }

    impl PartSolver<1> for ThreeParts {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.len().to_string())
        }
    }

    impl PartSolver<2> for ThreeParts {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.to_uppercase())
        }
    }

    impl PartSolver<3> for ThreeParts {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.chars().rev().collect())
        }
    }

    fn executor(dir: &TempDir, parallelize_by: ParallelizeBy, inputs: Vec<InputSource>) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<LineCount>(2023, 1)
            .unwrap()
            .register::<LineCount>(2023, 2)
            .unwrap()
            .build();
        let config = Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.path().to_path_buf(),
            inputs,
            thread_count: 2,
            parallelize_by,
            quiet: true,
        };
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.input, r.part));
        results
    }

    #[test]
    fn test_work_items_follow_input_order() {
        let dir = TempDir::new().unwrap();
        let executor = executor(
            &dir,
            ParallelizeBy::Day,
            vec![InputSource::Example, InputSource::User],
        );
        let keys: Vec<_> = executor
            .collect_work_items()
            .iter()
            .map(|w| (w.day, w.input))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, InputSource::Example),
                (1, InputSource::User),
                (2, InputSource::Example),
                (2, InputSource::User),
            ]
        );
    }

    #[test]
    fn test_all_modes_agree() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2023_day01.txt"), "ab\ncde").unwrap();
        fs::write(dir.path().join("2023_day02.txt"), "x\ny\nz").unwrap();

        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let results = run(executor(&dir, mode, vec![InputSource::User]));
            let answers: Vec<_> = results
                .iter()
                .map(|r| r.answer.as_deref().unwrap().to_string())
                .collect();
            assert_eq!(answers, vec!["2", "5", "3", "3"], "mode {:?}", mode);
            assert!(results.iter().all(|r| r.parse_duration.is_some()));
        }
    }

    #[test]
    fn test_missing_input_reports_every_part() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2023_day01.txt"), "ab").unwrap();

        let results = run(executor(&dir, ParallelizeBy::Day, vec![InputSource::User]));
        assert_eq!(results.len(), 4);
        assert!(results[..2].iter().all(|r| r.answer.is_ok()));
        for result in &results[2..] {
            assert_eq!(result.day, 2);
            assert!(matches!(
                result.answer,
                Err(SolverError::ParseError(ParseError::MissingData(_)))
            ));
            assert!(result.parse_duration.is_none());
        }
    }

    #[test]
    fn test_parse_failure_is_a_result_not_a_panic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2023_day01_example.txt"), "  \n").unwrap();
        fs::write(dir.path().join("2023_day02_example.txt"), "a").unwrap();

        for mode in [ParallelizeBy::Sequential, ParallelizeBy::Part] {
            let results = run(executor(&dir, mode, vec![InputSource::Example]));
            assert_eq!(results.len(), 4);
            assert!(results[..2].iter().all(|r| r.answer.is_err()));
            assert!(results[2..].iter().all(|r| r.answer.is_ok()));
        }
    }

    #[test]
    fn test_parallel_parts_beyond_two_arrive_in_order() {
        let registry = SolverRegistryBuilder::new()
            .register::<ThreeParts>(2023, 3)
            .unwrap()
            .build();
        let work = WorkItem {
            year: 2023,
            day: 3,
            input: InputSource::User,
            parts: 1..=3,
        };

        let (tx, rx) = std::sync::mpsc::channel();
        run_solver_parts_parallel(&work, "abc", &tx, &registry).unwrap();
        drop(tx);

        let results: Vec<_> = rx
            .into_iter()
            .map(|r| (r.part, r.answer.unwrap()))
            .collect();
        assert_eq!(
            results,
            vec![
                (1, "3".to_string()),
                (2, "ABC".to_string()),
                (3, "cba".to_string()),
            ]
        );
    }

    #[test]
    fn test_part_filter() {
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
        assert_eq!(filter_parts(None, 2), 1..=2);
    }
}
