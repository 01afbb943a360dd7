//! Core trait for GRASP problems and the minimizing decorator.

use crate::solution::Solution;

/// Defines a problem solvable by the GRASP engine.
///
/// The engine always **minimizes**. A problem whose natural objective is
/// maximized is handed to the engine wrapped in [`Inverse`], which
/// negates every evaluation without touching the underlying arithmetic.
///
/// Implementations own whatever scoring state they need (e.g. a dense
/// 0/1 state vector) and re-derive it from the passed [`Solution`] on
/// every call; evaluation methods therefore take `&mut self`. The
/// engine's deltas are *incremental*: they report the cost change of a
/// single move without re-scoring the whole solution, and they must
/// reconcile exactly with [`evaluate`](GraspProblem::evaluate) on the
/// moved-to solution.
pub trait GraspProblem {
    /// Number of binary decision variables.
    fn domain_size(&self) -> usize;

    /// Fully scores `solution`, caching the result in `solution.cost`.
    fn evaluate(&mut self, solution: &mut Solution) -> f64;

    /// Cost change from selecting `index`. Returns 0.0 when `index` is
    /// already selected (an idempotent no-op, not an error).
    fn insertion_delta(&mut self, index: usize, solution: &Solution) -> f64;

    /// Cost change from deselecting `index`. Returns 0.0 when `index` is
    /// not selected.
    fn removal_delta(&mut self, index: usize, solution: &Solution) -> f64;

    /// Cost change from simultaneously deselecting `leave` and selecting
    /// `enter`. Degenerates to a pure insertion or removal when the two
    /// coincide, when `enter` is already selected, or when `leave` is not.
    fn exchange_delta(&mut self, enter: usize, leave: usize, solution: &Solution) -> f64;

    /// Whether `index` may be selected given `solution`.
    ///
    /// Unconstrained problems keep the default (everything is feasible);
    /// QBFPT overrides this with its forbidden-triple oracle.
    fn is_feasible(&mut self, index: usize, solution: &Solution) -> bool {
        let _ = (index, solution);
        true
    }
}

/// Minimizing decorator: negates every evaluation of the wrapped problem.
///
/// Used to run the engine on maximization objectives. Feasibility and
/// domain size pass through untouched.
#[derive(Debug, Clone)]
pub struct Inverse<P> {
    inner: P,
}

impl<P> Inverse<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// The wrapped problem.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Consumes the decorator, returning the wrapped problem.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: GraspProblem> GraspProblem for Inverse<P> {
    fn domain_size(&self) -> usize {
        self.inner.domain_size()
    }

    fn evaluate(&mut self, solution: &mut Solution) -> f64 {
        let cost = -self.inner.evaluate(solution);
        solution.cost = cost;
        cost
    }

    fn insertion_delta(&mut self, index: usize, solution: &Solution) -> f64 {
        -self.inner.insertion_delta(index, solution)
    }

    fn removal_delta(&mut self, index: usize, solution: &Solution) -> f64 {
        -self.inner.removal_delta(index, solution)
    }

    fn exchange_delta(&mut self, enter: usize, leave: usize, solution: &Solution) -> f64 {
        -self.inner.exchange_delta(enter, leave, solution)
    }

    fn is_feasible(&mut self, index: usize, solution: &Solution) -> bool {
        self.inner.is_feasible(index, solution)
    }
}
