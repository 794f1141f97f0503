//! AOC CLI - runs the registered grid solvers against local puzzle inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Link aoc-grid so its solver plugins are registered
use aoc_grid as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use env_logger::Env;
use executor::Executor;
use log::{debug, warn};
use output::OutputFormatter;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    debug!("reading inputs from {}", config.input_dir.display());

    let registry = build_registry(&config.tags)?;

    let executor =
        Executor::new(registry, &config).map_err(|e| error::CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    // Missing inputs still run; their parts come back as errors
    let missing = check_missing_inputs(&executor, &work_items);
    if !missing.is_empty() {
        warn!("missing {} input file(s):", missing.len());
        for path in &missing {
            warn!("  - {}", path.display());
        }
    }

    run_executor(executor, work_items, config.quiet)
}

/// Paths of the input files that are not on disk
fn check_missing_inputs(
    executor: &Executor,
    work_items: &[executor::WorkItem],
) -> Vec<std::path::PathBuf> {
    let inputs = executor.inputs();
    work_items
        .iter()
        .filter(|w| !inputs.contains(w.year, w.day, w.input))
        .map(|w| inputs.path(w.year, w.day, w.input))
        .collect()
}

/// Run the executor and collect results
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<(), error::CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts
                .clone()
                .map(move |p| aggregator::ResultKey::new(w.year, w.day, w.input, p))
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();

    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    // Print results in order as they become ready
    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| error::CliError::Config("Executor thread panicked".to_string()))?
        .map_err(error::CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    let registry = builder.build();
    debug!("registered {} solver(s)", registry.len());
    Ok(registry)
}
