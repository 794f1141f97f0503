//! Long-horizon simulation by detecting when a deterministic process repeats.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use super::error::GridError;

/// Default number of consecutive agreeing periods required by
/// [`CycleDetector::metric_streak`].
pub const DEFAULT_STREAK: usize = 1000;

/// How repetition is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleDetector {
    /// Remember every full state. Exact: a repeated state proves the cycle.
    #[default]
    Fingerprint,
    /// Remember only the per-step metric and accept a period once `threshold`
    /// consecutive steps agree with it. Cheaper on memory but can be fooled by
    /// a metric that repeats before the underlying state does. Candidate
    /// periods are the distances back to every earlier sighting of the
    /// current value; the one agreeing with the longest recent run is kept.
    MetricStreak { threshold: usize },
}

impl CycleDetector {
    pub fn fingerprint() -> Self {
        CycleDetector::Fingerprint
    }

    pub fn metric_streak(threshold: usize) -> Result<Self, GridError> {
        if threshold == 0 {
            return Err(GridError::InvalidParameter(
                "metric streak threshold must be at least 1".to_string(),
            ));
        }
        Ok(CycleDetector::MetricStreak { threshold })
    }

    /// The metric of the state reached after applying `step` to `initial`
    /// exactly `target` times.
    ///
    /// Stepping stops as soon as a cycle is recognised; the answer is then
    /// read back from the recorded history. If the target comes first it is
    /// answered by direct simulation.
    ///
    /// ```rust
    /// use aoc_grid::utils::grid::CycleDetector;
    ///
    /// // 3 -> 4 -> 0 -> 1 -> 2 -> 3 -> ...
    /// let value = CycleDetector::fingerprint()
    ///     .value_at(3u64, |&x| (x + 1) % 5, |&x| x, 1_000_000_000);
    /// assert_eq!(value, 3);
    /// ```
    pub fn value_at<S, M>(
        &self,
        initial: S,
        step: impl FnMut(&S) -> S,
        metric: impl Fn(&S) -> M,
        target: u64,
    ) -> M
    where
        S: Clone + Eq + Hash,
        M: Clone + Eq + Hash,
    {
        match *self {
            CycleDetector::Fingerprint => by_fingerprint(initial, step, metric, target),
            CycleDetector::MetricStreak { threshold } => {
                by_streak(initial, step, metric, target, threshold)
            }
        }
    }
}

fn by_fingerprint<S, M>(
    initial: S,
    mut step: impl FnMut(&S) -> S,
    metric: impl Fn(&S) -> M,
    target: u64,
) -> M
where
    S: Clone + Eq + Hash,
    M: Clone,
{
    let mut seen: HashMap<S, usize> = HashMap::new();
    let mut history: Vec<M> = Vec::new();
    let mut state = initial;
    let mut i = 0usize;

    loop {
        if i as u64 == target {
            return metric(&state);
        }
        if let Some(&prev) = seen.get(&state) {
            let period = i - prev;
            debug!("state at step {} repeats step {} (period {})", i, prev, period);
            let offset = (target - prev as u64) % period as u64;
            return history[prev + offset as usize].clone();
        }
        history.push(metric(&state));
        let next = step(&state);
        seen.insert(state, i);
        state = next;
        i += 1;
    }
}

/// Length of the run of newest `history` entries that equal the entry `p`
/// steps before them, counted up to `cap`.
fn agreeing_run<M: Eq>(history: &[M], p: usize, cap: usize) -> usize {
    (p..history.len())
        .rev()
        .take(cap)
        .take_while(|&k| history[k] == history[k - p])
        .count()
}

fn by_streak<S, M>(
    initial: S,
    mut step: impl FnMut(&S) -> S,
    metric: impl Fn(&S) -> M,
    target: u64,
    threshold: usize,
) -> M
where
    M: Clone + Eq + Hash,
{
    let mut sightings: HashMap<M, Vec<usize>> = HashMap::new();
    let mut history: Vec<M> = Vec::new();
    let mut period: Option<usize> = None;
    let mut streak = 0;
    let mut state = initial;
    let mut i = 0usize;

    loop {
        let value = metric(&state);
        if i as u64 == target {
            return value;
        }
        history.push(value.clone());

        match period {
            Some(p) if history[i - p] == history[i] => streak += 1,
            _ => {
                let earlier = sightings.get(&value).map(Vec::as_slice).unwrap_or_default();
                let best = earlier
                    .iter()
                    .rev()
                    .map(|&j| {
                        let p = i - j;
                        (agreeing_run(&history, p, threshold), p)
                    })
                    .max_by_key(|&(run, p)| (run, Reverse(p)));
                (period, streak) = match best {
                    Some((run, p)) => (Some(p), run),
                    None => (None, 0),
                };
            }
        }
        sightings.entry(value).or_default().push(i);

        if let Some(p) = period.filter(|_| streak >= threshold) {
            // history[k] == history[k - p] for the last `threshold` steps.
            let start = i + 1 - threshold - p;
            debug!("metric period {} held for {} steps from step {}", p, streak, start);
            let offset = (target - start as u64) % p as u64;
            return history[start + offset as usize].clone();
        }
        state = step(&state);
        i += 1;
    }
}
