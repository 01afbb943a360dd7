//! GRASP execution: randomized-greedy construction plus the driver loop.
//!
//! # Algorithm
//!
//! 1. Build the full candidate list and an empty solution
//! 2. Construction: repeatedly filter the CL to feasible candidates,
//!    band the insertion deltas into an RCL, and draw one candidate via
//!    the configured bias — until a step stops strictly improving the
//!    cost or the CL runs dry
//! 3. Local search: refine to a local optimum
//! 4. Keep the best solution across iterations; stop at the iteration
//!    cap, the wall-clock budget, or external cancellation
//!
//! # Reference
//!
//! Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures",
//! *Journal of Global Optimization* 6, 109-133.

use super::candidates::CandidateList;
use super::config::{Construction, GraspConfig};
use super::types::GraspProblem;
use crate::solution::Solution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// One incumbent replacement during the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Improvement {
    /// Zero-based GRASP iteration at which the incumbent improved.
    pub iteration: usize,
    /// The new incumbent cost.
    pub cost: f64,
}

/// Result of a GRASP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspResult {
    /// The best solution found (an independent copy; the all-zero
    /// solution when no iteration improved on it).
    pub best: Solution,

    /// Cost of the best solution under the problem handed to the runner
    /// (the inverted value when the problem is wrapped in
    /// [`Inverse`](crate::grasp::Inverse)).
    pub best_cost: f64,

    /// GRASP iterations executed.
    pub iterations: usize,

    /// Iteration at which the best solution was found.
    pub best_iteration: usize,

    /// Every incumbent replacement, in order.
    pub improvements: Vec<Improvement>,

    /// Total local-search moves applied across all iterations.
    pub local_search_moves: usize,

    /// Incumbent cost after each iteration.
    pub cost_history: Vec<f64>,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Executes the GRASP metaheuristic.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP on `problem` under `config`.
    ///
    /// The runner minimizes; hand it an
    /// [`Inverse`](crate::grasp::Inverse)-wrapped problem to maximize.
    pub fn run<P: GraspProblem>(problem: &mut P, config: &GraspConfig) -> GraspResult {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs GRASP with an optional cancellation token.
    ///
    /// Like the time budget, the flag is polled between iterations only;
    /// a running construction or local search always completes.
    pub fn run_with_cancel<P: GraspProblem>(
        problem: &mut P,
        config: &GraspConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GraspResult {
        config.validate().expect("invalid GraspConfig");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let start = Instant::now();
        let mut incumbent = Solution::empty();
        let mut iterations = 0;
        let mut best_iteration = 0;
        let mut improvements = Vec::new();
        let mut local_search_moves = 0;
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut cancelled = false;

        for iteration in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let (mut current, mut cl) = construct(problem, config, &mut rng);
            local_search_moves += config.local_search.refine(problem, &mut current, &mut cl);

            if incumbent.cost > current.cost {
                incumbent = current.clone();
                best_iteration = iteration;
                improvements.push(Improvement {
                    iteration,
                    cost: incumbent.cost,
                });
            }

            iterations = iteration + 1;
            cost_history.push(incumbent.cost);

            if let Some(limit) = config.time_limit {
                if start.elapsed() > limit {
                    break;
                }
            }
        }

        GraspResult {
            best_cost: incumbent.cost,
            best: incumbent,
            iterations,
            best_iteration,
            improvements,
            local_search_moves,
            cost_history,
            cancelled,
        }
    }
}

/// Builds one solution by randomized-greedy construction.
///
/// Each step inserts one RCL draw and re-scores the solution. The loop
/// stops when the pre-step cost is no longer strictly greater than the
/// post-step cost — a step that fails to improve ends construction (its
/// insertion is kept; local search may undo it) — or early, when the
/// feasibility filter empties the candidate list.
///
/// Returns the solution together with the surviving candidate list,
/// which seeds the subsequent local search.
fn construct<P: GraspProblem, R: Rng>(
    problem: &mut P,
    config: &GraspConfig,
    rng: &mut R,
) -> (Solution, CandidateList) {
    let mut cl = CandidateList::new(problem.domain_size());
    let mut solution = Solution::empty();

    let mut alpha = config.alpha;
    if let Construction::RandomPlusGreedy { .. } = config.construction {
        alpha = 1.0;
    }

    let mut previous_cost = f64::INFINITY;
    let mut step = 0;
    while previous_cost > solution.cost {
        previous_cost = problem.evaluate(&mut solution);
        cl.retain_feasible(problem, &solution);
        if cl.is_empty() {
            break;
        }

        if let Construction::RandomPlusGreedy { random_steps } = config.construction {
            if step == random_steps {
                alpha = 0.0;
            }
        }

        let rcl = cl.restricted(problem, &solution, alpha);
        let chosen = config.bias.select(&rcl, rng);
        cl.remove(chosen);
        solution.add(chosen);
        problem.evaluate(&mut solution);
        step += 1;
    }

    (solution, cl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grasp::{Bias, Inverse, LocalSearch};
    use crate::qbfpt::{Instance, QbfptEvaluator};

    /// Decorator lifting all feasibility constraints, for scenarios that
    /// stipulate an unconstrained objective.
    struct Unconstrained<P>(P);

    impl<P: GraspProblem> GraspProblem for Unconstrained<P> {
        fn domain_size(&self) -> usize {
            self.0.domain_size()
        }
        fn evaluate(&mut self, solution: &mut Solution) -> f64 {
            self.0.evaluate(solution)
        }
        fn insertion_delta(&mut self, index: usize, solution: &Solution) -> f64 {
            self.0.insertion_delta(index, solution)
        }
        fn removal_delta(&mut self, index: usize, solution: &Solution) -> f64 {
            self.0.removal_delta(index, solution)
        }
        fn exchange_delta(&mut self, enter: usize, leave: usize, solution: &Solution) -> f64 {
            self.0.exchange_delta(enter, leave, solution)
        }
    }

    /// n = 3, diagonal 1.0, pairwise 2.0.
    fn all_pairs_instance() -> Instance {
        Instance::from_upper_triangular(
            3,
            &[vec![1.0, 2.0, 2.0], vec![1.0, 2.0], vec![1.0]],
        )
    }

    /// A 20-variable instance with mixed-sign coefficients, rich enough
    /// for construction and local search to do real work.
    fn mixed_instance() -> Instance {
        let n = 20;
        let mut rows = Vec::new();
        for i in 0..n {
            // Deterministic mixed-sign pattern, no RNG needed.
            let row: Vec<f64> = (i..n)
                .map(|j| {
                    let v = ((i * 7 + j * 13) % 11) as f64 - 5.0;
                    if i == j {
                        v
                    } else {
                        v / 2.0
                    }
                })
                .collect();
            rows.push(row);
        }
        Instance::from_upper_triangular(n, &rows)
    }

    fn greedy_config() -> GraspConfig {
        GraspConfig::default()
            .with_alpha(0.0)
            .with_max_iterations(5)
            .with_seed(42)
    }

    #[test]
    fn test_greedy_construction_selects_everything_when_maximizing() {
        // All coefficients non-negative and no constraints: under the
        // inverted (maximizing) objective every insertion improves, so
        // greedy construction must select all three indices.
        let mut problem = Inverse::new(Unconstrained(QbfptEvaluator::new(all_pairs_instance())));
        let config = greedy_config();
        let mut rng = StdRng::seed_from_u64(42);

        let (solution, cl) = construct(&mut problem, &config, &mut rng);

        assert_eq!(solution.len(), 3);
        assert!(cl.is_empty());
        assert!((solution.cost - -9.0).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_construction_stops_when_minimizing_raw_form() {
        // Same matrix, raw minimization: the first insertion worsens the
        // cost, so construction stops immediately after it.
        let mut problem = Unconstrained(QbfptEvaluator::new(all_pairs_instance()));
        let config = greedy_config();
        let mut rng = StdRng::seed_from_u64(42);

        let (solution, _) = construct(&mut problem, &config, &mut rng);

        assert_eq!(solution.len(), 1);
        assert!(solution.cost > 0.0);
    }

    #[test]
    fn test_minimizing_raw_form_returns_empty_incumbent() {
        // Local search undoes the overshoot insertion, and the empty
        // incumbent (cost 0) is never beaten.
        let mut problem = Unconstrained(QbfptEvaluator::new(all_pairs_instance()));
        let result = GraspRunner::run(&mut problem, &greedy_config());

        assert!(result.best.is_empty());
        assert!((result.best_cost - 0.0).abs() < 1e-12);
        assert!(result.improvements.is_empty());
    }

    #[test]
    fn test_forbidden_triple_caps_selection_at_two() {
        // For n = 3 every generated triple is {0, 1, 2}: with two
        // selected, the third must never enter the candidate list, so
        // the maximizing search tops out at two indices.
        let mut problem = Inverse::new(QbfptEvaluator::new(all_pairs_instance()));
        let result = GraspRunner::run(&mut problem, &greedy_config());

        assert_eq!(result.best.len(), 2);
        // Two diagonal terms plus one pairwise term, inverted.
        assert!((result.best_cost - -4.0).abs() < 1e-12);
    }

    #[test]
    fn test_incumbent_is_feasible_and_locally_optimal() {
        for local_search in [LocalSearch::BestImproving, LocalSearch::FirstImproving] {
            let mut problem = Inverse::new(QbfptEvaluator::new(mixed_instance()));
            let config = GraspConfig::default()
                .with_alpha(0.3)
                .with_max_iterations(20)
                .with_local_search(local_search)
                .with_seed(7);

            let result = GraspRunner::run(&mut problem, &config);

            // No forbidden triple may be fully selected.
            let mut best = result.best.clone();
            for triple in problem.inner().triples().triples() {
                let selected = triple.iter().filter(|&&i| best.contains(i)).count();
                assert!(selected < 3, "forbidden triple {triple:?} fully selected");
            }

            // Cached cost matches a fresh full evaluation.
            let cached = result.best_cost;
            let fresh = problem.evaluate(&mut best);
            assert!((cached - fresh).abs() < 1e-9, "{local_search:?}");

            // No single feasible move improves the incumbent.
            let eps = super::super::local_search::IMPROVEMENT_EPS;
            let mut cl = CandidateList::new(problem.domain_size());
            for &i in best.elements() {
                cl.remove(i);
            }
            cl.retain_feasible(&mut problem, &best);
            for &i in cl.indices() {
                assert!(problem.insertion_delta(i, &best) >= -eps);
            }
            for &i in best.elements() {
                assert!(problem.removal_delta(i, &best) >= -eps);
            }
            for &enter in cl.indices() {
                for &leave in best.elements() {
                    assert!(problem.exchange_delta(enter, leave, &best) >= -eps);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_run_exactly() {
        let config = GraspConfig::default()
            .with_alpha(0.4)
            .with_max_iterations(15)
            .with_bias(Bias::Linear)
            .with_seed(123);

        let mut p1 = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let r1 = GraspRunner::run(&mut p1, &config);

        let mut p2 = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let r2 = GraspRunner::run(&mut p2, &config);

        assert_eq!(r1.best.elements(), r2.best.elements());
        assert!((r1.best_cost - r2.best_cost).abs() < 1e-15);
        assert_eq!(r1.improvements, r2.improvements);
        assert_eq!(r1.cost_history, r2.cost_history);
    }

    #[test]
    fn test_random_plus_greedy_with_zero_steps_equals_pure_greedy() {
        // random_steps = 0 switches to alpha = 0.0 before the first RCL
        // is built, so the run must match Standard construction at
        // alpha = 0.0 draw for draw.
        let base = GraspConfig::default().with_max_iterations(10).with_seed(5);

        let mut p1 = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let r1 = GraspRunner::run(
            &mut p1,
            &base
                .clone()
                .with_alpha(0.0)
                .with_construction(Construction::Standard),
        );

        let mut p2 = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let r2 = GraspRunner::run(
            &mut p2,
            &base.with_construction(Construction::RandomPlusGreedy { random_steps: 0 }),
        );

        assert_eq!(r1.best.elements(), r2.best.elements());
        assert_eq!(r1.cost_history, r2.cost_history);
    }

    #[test]
    fn test_random_plus_greedy_anneals_to_feasible_solution() {
        let mut problem = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let config = GraspConfig::default()
            .with_max_iterations(10)
            .with_construction(Construction::RandomPlusGreedy { random_steps: 3 })
            .with_seed(11);

        let result = GraspRunner::run(&mut problem, &config);

        assert_eq!(result.iterations, 10);
        assert!(result.best_cost <= 0.0);
    }

    #[test]
    fn test_improvements_are_strictly_decreasing() {
        let mut problem = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let config = GraspConfig::default()
            .with_alpha(0.6)
            .with_max_iterations(30)
            .with_seed(3);

        let result = GraspRunner::run(&mut problem, &config);

        assert!(!result.improvements.is_empty());
        for window in result.improvements.windows(2) {
            assert!(window[1].cost < window[0].cost);
            assert!(window[1].iteration > window[0].iteration);
        }
        let last = result.improvements.last().unwrap();
        assert!((last.cost - result.best_cost).abs() < 1e-15);
        assert_eq!(last.iteration, result.best_iteration);
    }

    #[test]
    fn test_cost_history_tracks_incumbent() {
        let mut problem = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let config = GraspConfig::default().with_max_iterations(12).with_seed(9);

        let result = GraspRunner::run(&mut problem, &config);

        assert_eq!(result.cost_history.len(), result.iterations);
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0] + 1e-15);
        }
        assert!((result.cost_history.last().unwrap() - result.best_cost).abs() < 1e-15);
    }

    #[test]
    fn test_time_limit_stops_after_current_iteration() {
        let mut problem = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let config = GraspConfig::default()
            .with_max_iterations(1_000_000)
            .with_time_limit(std::time::Duration::ZERO)
            .with_seed(1);

        let result = GraspRunner::run(&mut problem, &config);

        // The budget is only checked between iterations: exactly one runs.
        assert_eq!(result.iterations, 1);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_cancellation_before_first_iteration() {
        let mut problem = Inverse::new(QbfptEvaluator::new(mixed_instance()));
        let config = GraspConfig::default().with_seed(1);

        // Pre-set flag: deterministic cancellation regardless of speed.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GraspRunner::run_with_cancel(&mut problem, &config, Some(cancel));

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.best.is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid GraspConfig")]
    fn test_invalid_config_panics() {
        let mut problem = Inverse::new(QbfptEvaluator::new(all_pairs_instance()));
        let config = GraspConfig::default().with_alpha(2.0);
        GraspRunner::run(&mut problem, &config);
    }
}
