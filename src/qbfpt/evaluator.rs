//! Quadratic objective evaluation over a dense 0/1 state vector.

use super::instance::Instance;
use super::triples::ForbiddenTriples;
use crate::grasp::GraspProblem;
use crate::solution::Solution;
use anyhow::Result;
use std::path::Path;

/// Evaluator for the QBFPT objective `f(x) = x' A x`.
///
/// Owns the dense state vector and re-derives it from the passed
/// [`Solution`] before every scoring or feasibility call, so the cached
/// solution cost can never drift from the quadratic form. Full
/// evaluation is O(n²); the insertion/removal/exchange deltas touch only
/// the affected row and column.
///
/// The raw form is whatever the instance encodes. QBFPT benchmarks are
/// maximization problems, so the typical setup hands the engine
/// `Inverse::new(QbfptEvaluator::new(instance))`.
#[derive(Debug, Clone)]
pub struct QbfptEvaluator {
    instance: Instance,
    triples: ForbiddenTriples,
    variables: Vec<f64>,
}

impl QbfptEvaluator {
    /// Builds an evaluator, generating the instance's forbidden triples.
    pub fn new(instance: Instance) -> Self {
        let n = instance.len();
        Self {
            instance,
            triples: ForbiddenTriples::generate(n),
            variables: vec![0.0; n],
        }
    }

    /// Reads an instance file and builds an evaluator for it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Instance::from_path(path)?))
    }

    /// The underlying instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The instance's forbidden-triple set.
    pub fn triples(&self) -> &ForbiddenTriples {
        &self.triples
    }

    /// Synchronizes the state vector with `solution`.
    fn set_variables(&mut self, solution: &Solution) {
        self.variables.fill(0.0);
        for &i in solution.iter() {
            self.variables[i] = 1.0;
        }
    }

    /// Full `x' A x` pass over the current state vector.
    fn score(&self) -> f64 {
        let n = self.instance.len();
        let a = self.instance.matrix();
        let mut sum = 0.0;
        for i in 0..n {
            let mut row = 0.0;
            for j in 0..n {
                row += self.variables[j] * a[i][j];
            }
            sum += row * self.variables[i];
        }
        sum
    }

    /// Objective contribution of variable `i` against the current state,
    /// disregarding whether `i` is itself selected: one row plus one
    /// column of `A`, folded symmetrically, plus the diagonal term.
    fn contribution(&self, i: usize) -> f64 {
        let a = self.instance.matrix();
        let mut sum = 0.0;
        for j in 0..self.instance.len() {
            if i != j {
                sum += self.variables[j] * (a[i][j] + a[j][i]);
            }
        }
        sum + a[i][i]
    }

    /// Insertion delta against the already-synchronized state vector.
    fn insertion_on_state(&self, i: usize) -> f64 {
        if self.variables[i] == 1.0 {
            return 0.0;
        }
        self.contribution(i)
    }

    /// Removal delta against the already-synchronized state vector.
    fn removal_on_state(&self, i: usize) -> f64 {
        if self.variables[i] == 0.0 {
            return 0.0;
        }
        -self.contribution(i)
    }

    /// Exchange delta against the already-synchronized state vector.
    ///
    /// The cross term `a[enter][leave] + a[leave][enter]` is subtracted
    /// once: both contributions count the pairwise interaction of the
    /// two indices, but after the exchange only one of them is selected.
    fn exchange_on_state(&self, enter: usize, leave: usize) -> f64 {
        if enter == leave {
            return 0.0;
        }
        if self.variables[enter] == 1.0 {
            return self.removal_on_state(leave);
        }
        if self.variables[leave] == 0.0 {
            return self.insertion_on_state(enter);
        }

        let a = self.instance.matrix();
        self.contribution(enter) - self.contribution(leave) - (a[enter][leave] + a[leave][enter])
    }

    fn check_index(&self, i: usize) {
        assert!(
            i < self.instance.len(),
            "variable index {i} out of range for instance of size {}",
            self.instance.len()
        );
    }
}

impl GraspProblem for QbfptEvaluator {
    fn domain_size(&self) -> usize {
        self.instance.len()
    }

    fn evaluate(&mut self, solution: &mut Solution) -> f64 {
        self.set_variables(solution);
        let cost = self.score();
        solution.cost = cost;
        cost
    }

    fn insertion_delta(&mut self, index: usize, solution: &Solution) -> f64 {
        self.check_index(index);
        self.set_variables(solution);
        self.insertion_on_state(index)
    }

    fn removal_delta(&mut self, index: usize, solution: &Solution) -> f64 {
        self.check_index(index);
        self.set_variables(solution);
        self.removal_on_state(index)
    }

    fn exchange_delta(&mut self, enter: usize, leave: usize, solution: &Solution) -> f64 {
        self.check_index(enter);
        self.check_index(leave);
        self.set_variables(solution);
        self.exchange_on_state(enter, leave)
    }

    fn is_feasible(&mut self, index: usize, solution: &Solution) -> bool {
        self.check_index(index);
        self.set_variables(solution);
        self.triples.is_feasible(index, &self.variables)
    }
}
