//! Candidate-list management: the CL and its alpha-restricted subset.

use super::types::GraspProblem;
use crate::solution::Solution;

/// The set of indices currently eligible to enter the solution.
///
/// Starts as the full domain, shrinks as indices are selected or
/// filtered infeasible, and regains indices that local search removes
/// from the solution. The list and the solution are disjoint at all
/// times; the engine moves indices between the two, never copies.
/// Order is preserved across every operation — deterministic scans
/// depend on it.
#[derive(Debug, Clone)]
pub struct CandidateList {
    indices: Vec<usize>,
}

impl CandidateList {
    /// Builds the full candidate list `0..domain_size`.
    pub fn new(domain_size: usize) -> Self {
        Self {
            indices: (0..domain_size).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Current candidates in list order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Removes `index` from the list, preserving the order of the rest.
    ///
    /// Returns `false` when `index` was not present.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.indices.iter().position(|&i| i == index) {
            Some(pos) => {
                self.indices.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns `index` to the list (used when local search deselects it).
    pub fn push(&mut self, index: usize) {
        debug_assert!(
            !self.indices.contains(&index),
            "index {index} already in candidate list"
        );
        self.indices.push(index);
    }

    /// Drops every candidate the problem reports infeasible against the
    /// current solution. Surviving candidates keep their order.
    pub fn retain_feasible<P: GraspProblem>(&mut self, problem: &mut P, solution: &Solution) {
        self.indices.retain(|&i| problem.is_feasible(i, solution));
    }

    /// Builds the restricted candidate list for one construction step.
    ///
    /// Every candidate's insertion delta is computed once; the RCL keeps
    /// those within `alpha` of the best: `delta <= min + alpha * (max - min)`.
    /// Entries come back as `(candidate, delta)` pairs in list order.
    /// Empty exactly when the candidate list is empty.
    pub fn restricted<P: GraspProblem>(
        &self,
        problem: &mut P,
        solution: &Solution,
        alpha: f64,
    ) -> Vec<(usize, f64)> {
        let deltas: Vec<(usize, f64)> = self
            .indices
            .iter()
            .map(|&i| (i, problem.insertion_delta(i, solution)))
            .collect();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &(_, delta) in &deltas {
            if delta < min {
                min = delta;
            }
            if delta > max {
                max = delta;
            }
        }

        let threshold = min + alpha * (max - min);
        deltas
            .into_iter()
            .filter(|&(_, delta)| delta <= threshold)
            .collect()
    }
}
