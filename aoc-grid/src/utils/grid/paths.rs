//! Shortest and longest simple paths over a [`JunctionGraph`].

use super::error::GridError;
use super::junction::JunctionGraph;
use super::search::{BestFirst, ClosureSearch};

fn check_nodes(graph: &JunctionGraph, from: usize, to: usize) -> Result<(), GridError> {
    if from >= graph.len() || to >= graph.len() {
        return Err(GridError::InvalidParameter(format!(
            "nodes {} and {} must be below {}",
            from,
            to,
            graph.len()
        )));
    }
    Ok(())
}

/// Minimum total weight from `from` to `to`.
pub fn shortest_path(graph: &JunctionGraph, from: usize, to: usize) -> Result<u64, GridError> {
    check_nodes(graph, from, to)?;
    let problem = ClosureSearch::new(
        vec![from],
        |&node: &usize| graph.edges(node).iter().map(|e| (e.to, e.weight)).collect(),
        |&node: &usize| node == to,
    );
    BestFirst::new(problem).run().map(|outcome| outcome.cost)
}

/// Maximum total weight over simple paths from `from` to `to`.
///
/// Exhaustive depth-first search; exponential in the number of junctions.
pub fn longest_path(graph: &JunctionGraph, from: usize, to: usize) -> Result<u64, GridError> {
    check_nodes(graph, from, to)?;
    let mut on_path = vec![false; graph.len()];
    longest_from(graph, from, to, &mut on_path).ok_or_else(|| {
        GridError::NoSolution(format!("node {} is unreachable from node {}", to, from))
    })
}

fn longest_from(graph: &JunctionGraph, node: usize, to: usize, on_path: &mut [bool]) -> Option<u64> {
    if node == to {
        return Some(0);
    }
    on_path[node] = true;
    let mut best = None;
    for edge in graph.edges(node) {
        if on_path[edge.to] {
            continue;
        }
        if let Some(rest) = longest_from(graph, edge.to, to, on_path) {
            best = best.max(Some(rest + edge.weight));
        }
    }
    on_path[node] = false;
    best
}
