//! Greedy search for a locally minimal counterexample.

use tracing::{debug, trace};

use crate::shrinkable::Shrinkable;

/// Result of a shrink search.
#[derive(Debug, Clone)]
pub struct ShrinkOutcome<T> {
    /// The simplest failing value found.
    pub minimal: Shrinkable<T>,
    /// Number of accepted shrink steps.
    pub shrinks: usize,
    /// Number of times the property was evaluated.
    pub evaluations: usize,
    /// `true` when no candidate of `minimal` fails; `false` when the search
    /// stopped at its step limit.
    pub exhausted: bool,
}

/// Depth-first shrink search with an optional step limit.
///
/// Starting from a failing value, candidates are tried in order and the
/// first one that still fails replaces the current best. The search then
/// restarts from that candidate's own candidates, and stops once a full
/// scan finds nothing that fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShrinkSearch {
    limit: Option<usize>,
}

impl ShrinkSearch {
    /// A search without a step limit.
    pub fn new() -> Self {
        ShrinkSearch { limit: None }
    }

    /// Stop after `limit` accepted steps.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Shrink `failing` against `property`, which returns `true` when the
    /// property holds for a value.
    pub fn run<T, P>(&self, mut property: P, failing: Shrinkable<T>) -> ShrinkOutcome<T>
    where
        T: 'static,
        P: FnMut(&T) -> bool,
    {
        let mut best = failing;
        let mut shrinks = 0;
        let mut evaluations = 0;

        let exhausted = loop {
            if self.limit.is_some_and(|limit| shrinks >= limit) {
                break false;
            }

            let mut next = None;
            for candidate in best.shrink() {
                evaluations += 1;
                if !property(&candidate.value) {
                    next = Some(candidate);
                    break;
                }
            }

            match next {
                Some(candidate) => {
                    best = candidate;
                    shrinks += 1;
                    trace!(step = shrinks, evaluations, "accepted shrink candidate");
                }
                None => break true,
            }
        };

        debug!(shrinks, evaluations, exhausted, "shrinking finished");
        ShrinkOutcome {
            minimal: best,
            shrinks,
            evaluations,
            exhausted,
        }
    }
}

/// Shrink `failing` against `property` without a step limit.
pub fn shrink_search<T, P>(property: P, failing: Shrinkable<T>) -> ShrinkOutcome<T>
where
    T: 'static,
    P: FnMut(&T) -> bool,
{
    ShrinkSearch::new().run(property, failing)
}
