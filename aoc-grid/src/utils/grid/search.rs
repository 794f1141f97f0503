//! Cost-ordered best-first search over arbitrary hashable states.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use log::{debug, trace};

use super::error::GridError;
use super::model::{Direction, Grid, Pos};

/// A state space to be searched for a cheapest terminal state.
///
/// `State` is the cache key. Two states are the same node iff they compare
/// equal, so it must carry every discriminator that changes which moves are
/// legal (heading, run length...), and nothing more.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;

    /// Starting states, all at cost 0.
    fn seeds(&self) -> Vec<Self::State>;

    /// Legal moves out of `state` with their non-negative added cost.
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, u64)>;

    /// Whether `state` is an acceptable end of search.
    fn is_goal(&self, state: &Self::State) -> bool;
}

/// Adapts closures to [`SearchProblem`] for one-off searches.
pub struct ClosureSearch<S, N, G>
where
    N: Fn(&S) -> Vec<(S, u64)>,
    G: Fn(&S) -> bool,
{
    seeds: Vec<S>,
    successors: N,
    is_goal: G,
}

impl<S, N, G> ClosureSearch<S, N, G>
where
    N: Fn(&S) -> Vec<(S, u64)>,
    G: Fn(&S) -> bool,
{
    pub fn new(seeds: Vec<S>, successors: N, is_goal: G) -> Self {
        Self {
            seeds,
            successors,
            is_goal,
        }
    }
}

impl<S, N, G> SearchProblem for ClosureSearch<S, N, G>
where
    S: Clone + Eq + Hash,
    N: Fn(&S) -> Vec<(S, u64)>,
    G: Fn(&S) -> bool,
{
    type State = S;

    fn seeds(&self) -> Vec<S> {
        self.seeds.clone()
    }

    fn successors(&self, state: &S) -> Vec<(S, u64)> {
        (self.successors)(state)
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.is_goal)(state)
    }
}

/// The cheapest terminal state found by [`BestFirst::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<S> {
    pub cost: u64,
    pub state: S,
    /// Seed-to-goal states, only recorded when tracing is enabled.
    pub trace: Option<Vec<S>>,
}

/// Dijkstra-style search with lazy deletion.
///
/// Frontier entries are never updated in place: a state may sit in the heap
/// several times, and every copy popped after the first is discarded because
/// the best-cost cache already holds a value no larger than it.
///
/// # Example
///
/// ```rust
/// use aoc_grid::utils::grid::{BestFirst, ClosureSearch};
///
/// // Walk the number line from 0 to 10 with steps of +1 (cost 2) or +3 (cost 5).
/// let problem = ClosureSearch::new(
///     vec![0u32],
///     |&n: &u32| if n >= 10 { vec![] } else { vec![(n + 1, 2), (n + 3, 5)] },
///     |&n: &u32| n == 10,
/// );
/// let outcome = BestFirst::new(problem).run().unwrap();
/// assert_eq!(outcome.cost, 17);
/// ```
pub struct BestFirst<P: SearchProblem> {
    problem: P,
    trace: bool,
}

impl<P: SearchProblem> BestFirst<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            trace: false,
        }
    }

    /// Record the path to the goal in [`SearchOutcome::trace`].
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Minimum accumulated cost over all goal states.
    ///
    /// Returns [`GridError::NoSolution`] when the frontier drains first.
    pub fn run(&self) -> Result<SearchOutcome<P::State>, GridError> {
        // Arena of pushed states; heap entries refer to it by index.
        let mut arena: Vec<(P::State, Option<usize>)> = Vec::new();
        let mut frontier = BinaryHeap::new();
        let mut best: HashMap<P::State, u64> = HashMap::new();

        for seed in self.problem.seeds() {
            arena.push((seed, None));
            frontier.push(Reverse((0u64, arena.len() - 1)));
        }

        while let Some(Reverse((cost, id))) = frontier.pop() {
            let state = &arena[id].0;
            match best.entry(state.clone()) {
                Entry::Occupied(seen) if *seen.get() <= cost => continue,
                Entry::Occupied(mut seen) => {
                    seen.insert(cost);
                }
                Entry::Vacant(slot) => {
                    slot.insert(cost);
                }
            }

            if self.problem.is_goal(state) {
                trace!(
                    "goal at cost {} after {} settled, {} pushed",
                    cost,
                    best.len(),
                    arena.len()
                );
                return Ok(SearchOutcome {
                    cost,
                    state: state.clone(),
                    trace: self.trace.then(|| unwind(&arena, id)),
                });
            }

            for (next, added) in self.problem.successors(state) {
                if best.contains_key(&next) {
                    continue;
                }
                arena.push((next, Some(id)));
                frontier.push(Reverse((cost + added, arena.len() - 1)));
            }
        }

        debug!(
            "search exhausted after settling {} states without a goal",
            best.len()
        );
        Err(GridError::NoSolution(format!(
            "frontier exhausted after {} states",
            best.len()
        )))
    }
}

fn unwind<S: Clone>(arena: &[(S, Option<usize>)], mut id: usize) -> Vec<S> {
    let mut path = vec![arena[id].0.clone()];
    while let Some(parent) = arena[id].1 {
        path.push(arena[parent].0.clone());
        id = parent;
    }
    path.reverse();
    path
}

/// Node of a [`RunLimitedWalk`]: where we are, which way we face, and how
/// many cells we have moved in a straight line to get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    pub pos: Pos,
    pub dir: Direction,
    pub run: u8,
}

/// Walk over a grid of digit costs where each straight run must be between
/// `min_run` and `max_run` cells long.
///
/// Entering a cell costs its digit; the start cell is free. Turning is
/// allowed only once the current run reaches `min_run`, going straight only
/// while it is below `max_run`, and reversing never. The end is accepted only
/// when the run that reached it is at least `min_run` long.
pub struct RunLimitedWalk<'g> {
    grid: &'g Grid,
    costs: Vec<u8>,
    start: Pos,
    end: Pos,
    min_run: u8,
    max_run: u8,
}

impl<'g> RunLimitedWalk<'g> {
    pub fn new(
        grid: &'g Grid,
        start: Pos,
        end: Pos,
        min_run: u8,
        max_run: u8,
    ) -> Result<Self, GridError> {
        if max_run == 0 || min_run > max_run {
            return Err(GridError::InvalidParameter(format!(
                "straight run limits {}..={} are empty",
                min_run, max_run
            )));
        }
        if !grid.contains(start) || !grid.contains(end) {
            return Err(GridError::InvalidParameter(format!(
                "start {} or end {} lies outside the grid",
                start, end
            )));
        }
        Ok(Self {
            grid,
            costs: grid.digits()?,
            start,
            end,
            min_run,
            max_run,
        })
    }
}

impl SearchProblem for RunLimitedWalk<'_> {
    type State = Heading;

    fn seeds(&self) -> Vec<Heading> {
        // A zero-length run may not turn, so seed every heading.
        Direction::ALL
            .into_iter()
            .map(|dir| Heading {
                pos: self.start,
                dir,
                run: 0,
            })
            .collect()
    }

    fn successors(&self, state: &Heading) -> Vec<(Heading, u64)> {
        let mut moves = Vec::with_capacity(3);
        if state.run < self.max_run {
            moves.push((state.dir, state.run + 1));
        }
        if state.run >= self.min_run && state.run > 0 {
            moves.push((state.dir.turn_left(), 1));
            moves.push((state.dir.turn_right(), 1));
        }

        moves
            .into_iter()
            .filter_map(|(dir, run)| {
                let pos = self.grid.step(state.pos, dir)?;
                let cost = self.costs[self.grid.index(pos)] as u64;
                Some((Heading { pos, dir, run }, cost))
            })
            .collect()
    }

    fn is_goal(&self, state: &Heading) -> bool {
        state.pos == self.end && state.run >= self.min_run.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_three_by_three() {
        let grid = Grid::parse("111\n111\n111").unwrap();
        let walk = RunLimitedWalk::new(&grid, Pos::new(0, 0), Pos::new(2, 2), 0, 3).unwrap();
        assert_eq!(BestFirst::new(walk).run().unwrap().cost, 4);
    }

    #[test]
    fn test_trace_follows_run_limits() {
        let grid = Grid::parse("11111\n99991\n99991").unwrap();
        let walk = RunLimitedWalk::new(&grid, Pos::new(0, 0), Pos::new(2, 4), 1, 3).unwrap();
        let outcome = BestFirst::new(walk).with_trace(true).run().unwrap();

        let trace = outcome.trace.unwrap();
        assert_eq!(trace.first().unwrap().pos, Pos::new(0, 0));
        assert_eq!(trace.last().unwrap().pos, Pos::new(2, 4));
        assert!(trace.iter().all(|h| h.run <= 3));
        // Costs along the trace add up to the reported total.
        let walked: u64 = trace[1..]
            .iter()
            .map(|h| (grid.at(h.pos).unwrap() - b'0') as u64)
            .sum();
        assert_eq!(walked, outcome.cost);
    }

    #[test]
    fn test_min_run_blocks_short_finish() {
        // Reaching the 2x2 corner needs a run of 1, which min_run = 4 forbids.
        let grid = Grid::parse("11\n11").unwrap();
        let walk = RunLimitedWalk::new(&grid, Pos::new(0, 0), Pos::new(1, 1), 4, 10).unwrap();
        assert!(matches!(
            BestFirst::new(walk).run(),
            Err(GridError::NoSolution(_))
        ));
    }

    #[test]
    fn test_walk_stays_inside_grid_edges() {
        // The cheap route hugs the top, right and bottom edges.
        let grid = Grid::parse("1119\n9991\n1111").unwrap();
        let walk = RunLimitedWalk::new(&grid, Pos::new(0, 0), Pos::new(2, 0), 0, 3).unwrap();
        let outcome = BestFirst::new(walk).with_trace(true).run().unwrap();
        assert_eq!(outcome.cost, 8);
        assert!(outcome.trace.unwrap().iter().all(|h| grid.contains(h.pos)));
    }

    #[test]
    fn test_rejects_empty_run_limits() {
        let grid = Grid::parse("11\n11").unwrap();
        assert!(RunLimitedWalk::new(&grid, Pos::new(0, 0), Pos::new(1, 1), 4, 3).is_err());
    }

    #[test]
    fn test_lazy_deletion_keeps_cheapest() {
        // Two routes into node 2: direct (cost 10) and via 1 (cost 1 + 1).
        let edges = |&n: &u8| match n {
            0 => vec![(2, 10), (1, 1)],
            1 => vec![(2, 1)],
            2 => vec![(3, 1)],
            _ => vec![],
        };
        let problem = ClosureSearch::new(vec![0u8], edges, |&n: &u8| n == 3);
        let outcome = BestFirst::new(problem).with_trace(true).run().unwrap();

        assert_eq!(outcome.cost, 3);
        assert_eq!(outcome.trace, Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_zero_cost_goal_is_not_confused_with_failure() {
        let problem = ClosureSearch::new(vec![7u8], |_: &u8| vec![], |&n: &u8| n == 7);
        assert_eq!(BestFirst::new(problem).run().unwrap().cost, 0);

        let problem = ClosureSearch::new(vec![7u8], |_: &u8| vec![], |&n: &u8| n == 8);
        assert!(BestFirst::new(problem).run().is_err());
    }
}
