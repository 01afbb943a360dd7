//! GRASP metaheuristic engine for QBFPT.
//!
//! QBFPT is the problem of optimizing a quadratic binary function
//! `f(x) = x' A x` over `x ∈ {0,1}^n` subject to *prohibited triples*:
//! `n` deterministically generated index triples of which at most two
//! members may be selected at once. This crate provides:
//!
//! - **GRASP engine** ([`grasp`]): randomized-greedy construction with
//!   an alpha-restricted candidate list, biased random selection
//!   (uniform, linear, logarithmic, exponential, polynomial rank
//!   weights), best- and first-improving local search over the
//!   insertion/removal/2-exchange neighborhood, and a driver loop with
//!   iteration, wall-clock, and cancellation budgets.
//! - **QBFPT problem** ([`qbfpt`]): instance loading (upper-triangular
//!   coefficient format), incremental objective evaluation, and the
//!   forbidden-triple feasibility oracle.
//!
//! The engine minimizes; QBFPT benchmarks maximize, so the usual setup
//! wraps the evaluator in the [`Inverse`](grasp::Inverse) decorator:
//!
//! ```no_run
//! use grasp_qbfpt::grasp::{GraspConfig, GraspRunner, Inverse};
//! use grasp_qbfpt::qbfpt::QbfptEvaluator;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut problem = Inverse::new(QbfptEvaluator::from_path("instances/qbf020")?);
//! let config = GraspConfig::default().with_alpha(0.25).with_seed(0);
//! let result = GraspRunner::run(&mut problem, &config);
//! println!("{}", result.best);
//! # Ok(())
//! # }
//! ```
//!
//! Runs are single-threaded and fully reproducible: the same seed and
//! configuration replay a search bit-for-bit.

pub mod grasp;
pub mod qbfpt;
pub mod solution;

pub use solution::Solution;
