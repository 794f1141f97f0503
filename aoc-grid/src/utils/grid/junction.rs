//! Contraction of maze corridors into a weighted graph of junctions.

use std::collections::HashMap;

use log::debug;

use super::error::GridError;
use super::model::{Direction, Grid, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub to: usize,
    pub weight: u64,
}

/// Weighted graph over junction cells.
///
/// Node 0 is the start and node 1 the end; remaining junctions follow in
/// row-major order. Edges are directed; an undirected maze simply produces
/// both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionGraph {
    nodes: Vec<Pos>,
    index: HashMap<Pos, usize>,
    edges: Vec<Vec<Edge>>,
}

impl JunctionGraph {
    /// Build a graph directly from `(from, to, weight)` triples.
    pub fn from_edges(
        nodes: Vec<Pos>,
        edges: impl IntoIterator<Item = (usize, usize, u64)>,
    ) -> Result<Self, GridError> {
        let index: HashMap<Pos, usize> = nodes.iter().enumerate().map(|(i, &p)| (p, i)).collect();
        if index.len() != nodes.len() {
            return Err(GridError::InvalidParameter(
                "junction positions must be distinct".to_string(),
            ));
        }
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for (from, to, weight) in edges {
            if from >= nodes.len() || to >= nodes.len() {
                return Err(GridError::InvalidParameter(format!(
                    "edge {} -> {} references a missing node",
                    from, to
                )));
            }
            let edge = Edge { to, weight };
            if !adjacency[from].contains(&edge) {
                adjacency[from].push(edge);
            }
        }
        Ok(Self {
            nodes,
            index,
            edges: adjacency,
        })
    }

    /// Contract every corridor of `grid` between `start` and `end`.
    ///
    /// `passable` classifies cell symbols. `can_move(grid, from, dir)` further
    /// restricts which passable steps are legal (one-way terrain); junction
    /// detection ignores it and looks only at passable neighbours.
    pub fn contract<P, M>(
        grid: &Grid,
        start: Pos,
        end: Pos,
        passable: P,
        can_move: M,
    ) -> Result<Self, GridError>
    where
        P: Fn(u8) -> bool,
        M: Fn(&Grid, Pos, Direction) -> bool,
    {
        for pos in [start, end] {
            if !grid.at(pos).is_some_and(&passable) {
                return Err(GridError::InvalidParameter(format!(
                    "{} is not a passable cell",
                    pos
                )));
            }
        }
        if start == end {
            return Err(GridError::InvalidParameter(
                "start and end coincide".to_string(),
            ));
        }

        let open = |pos: Pos| grid.at(pos).is_some_and(&passable);
        let degree = |pos: Pos| grid.neighbors4(pos).filter(|&(_, n)| open(n)).count();

        let mut nodes = vec![start, end];
        nodes.extend(
            grid.positions()
                .filter(|&p| p != start && p != end && open(p) && degree(p) > 2),
        );
        let index: HashMap<Pos, usize> = nodes.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut triples = Vec::new();
        for (from, &origin) in nodes.iter().enumerate() {
            for dir in Direction::ALL {
                let Some(first) = grid.step(origin, dir) else {
                    continue;
                };
                if !open(first) || !can_move(grid, origin, dir) {
                    continue;
                }

                let mut prev = origin;
                let mut cur = first;
                let mut steps = 1u64;
                loop {
                    if let Some(&to) = index.get(&cur) {
                        if to != from {
                            triples.push((from, to, steps));
                        }
                        break;
                    }
                    let next = grid
                        .neighbors4(cur)
                        .find(|&(d, n)| n != prev && open(n) && can_move(grid, cur, d));
                    match next {
                        Some((_, n)) if steps < grid.len() as u64 => {
                            prev = cur;
                            cur = n;
                            steps += 1;
                        }
                        // Dead end, or a one-way step against the walk.
                        _ => break,
                    }
                }
            }
        }

        let graph = Self::from_edges(nodes, triples)?;
        debug!(
            "contracted {} cells into {} junctions and {} edges",
            grid.len(),
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn position(&self, node: usize) -> Option<Pos> {
        self.nodes.get(node).copied()
    }

    pub fn node(&self, pos: Pos) -> Option<usize> {
        self.index.get(&pos).copied()
    }

    pub fn edges(&self, node: usize) -> &[Edge] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }

    /// All edges as sorted `(from, to, weight)` triples.
    pub fn edge_list(&self) -> Vec<(usize, usize, u64)> {
        let mut list: Vec<_> = self
            .edges
            .iter()
            .enumerate()
            .flat_map(|(from, out)| out.iter().map(move |e| (from, e.to, e.weight)))
            .collect();
        list.sort_unstable();
        list
    }
}
