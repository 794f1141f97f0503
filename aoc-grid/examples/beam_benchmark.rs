//! Benchmark comparing beam energizing strategies on a generated contraption.
//!
//! Run with: cargo run --example beam_benchmark --release
//!
//! Every edge entry of the grid is energized four ways:
//! - `energize` for each entry, one after another (baseline)
//! - `energize` for each entry, entries spread over rayon's pool
//! - `energize_parallel` for each entry, one after another
//! - `energize_parallel` with entries spread over rayon's pool

use aoc_grid::utils::grid::{Grid, edge_entries, energize, energize_parallel};
use rayon::prelude::*;
use std::time::Instant;

const SIDE: usize = 110;
const MIRROR_PERCENT: u64 = 12;

fn generate_contraption(seed: u64, side: usize) -> Grid {
    const SYMBOLS: &[u8] = br"/\|-";
    let mut rng = seed;
    let text = (0..side)
        .map(|_| {
            (0..side)
                .map(|_| {
                    rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
                    let roll = (rng >> 33) % 100;
                    if roll < MIRROR_PERCENT {
                        SYMBOLS[(roll % 4) as usize] as char
                    } else {
                        '.'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");
    match Grid::parse(&text) {
        Ok(grid) => grid,
        Err(e) => panic!("generated grid is rectangular: {}", e),
    }
}

fn main() {
    println!("Beam Energizing Benchmark");
    println!("=========================\n");

    let grid = generate_contraption(42, SIDE);
    let entries = edge_entries(&grid);
    println!("Grid {}x{}, {} edge entries\n", grid.rows(), grid.cols(), entries.len());

    let start = Instant::now();
    let sequential: Vec<usize> = entries.iter().map(|&b| energize(&grid, b)).collect();
    let sequential_time = start.elapsed();
    println!("energize, sequential entries:          {:?}", sequential_time);

    let start = Instant::now();
    let par_entries: Vec<usize> = entries.par_iter().map(|&b| energize(&grid, b)).collect();
    let par_entries_time = start.elapsed();
    println!("energize, parallel entries:            {:?}", par_entries_time);

    let start = Instant::now();
    let par_beams: Vec<usize> = entries
        .iter()
        .map(|&b| energize_parallel(&grid, b))
        .collect();
    let par_beams_time = start.elapsed();
    println!("energize_parallel, sequential entries: {:?}", par_beams_time);

    let start = Instant::now();
    let both: Vec<usize> = entries
        .par_iter()
        .map(|&b| energize_parallel(&grid, b))
        .collect();
    let both_time = start.elapsed();
    println!("energize_parallel, parallel entries:   {:?}", both_time);

    assert_eq!(sequential, par_entries);
    assert_eq!(sequential, par_beams);
    assert_eq!(sequential, both);

    let best = sequential.iter().max().copied().unwrap_or(0);
    println!("\nMost energized tiles from any entry: {}", best);
    println!(
        "Speedup (parallel entries vs baseline): {:.2}x",
        sequential_time.as_secs_f64() / par_entries_time.as_secs_f64().max(f64::EPSILON)
    );
}
