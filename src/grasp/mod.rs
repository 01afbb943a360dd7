//! GRASP: Greedy Randomized Adaptive Search Procedure.
//!
//! A multi-start metaheuristic for combinatorial minimization: each
//! iteration builds a solution by randomized-greedy construction, then
//! refines it to a local optimum; the best solution across iterations is
//! kept. Problems plug in through the [`GraspProblem`] trait; objectives
//! that are naturally maximized are wrapped in [`Inverse`].
//!
//! # Key Types
//!
//! - [`GraspProblem`]: problem contract — full and incremental
//!   evaluation plus a feasibility test
//! - [`GraspConfig`]: greediness parameter, budgets, phase strategies
//! - [`GraspRunner`]: executes the construct/search loop
//! - [`GraspResult`]: final incumbent with run statistics
//! - [`Bias`]: rank-to-weight families for RCL selection
//! - [`LocalSearch`]: best-improving / first-improving refinement
//! - [`CandidateList`]: the CL and its alpha-restricted subset
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"
//! - Resende & Ribeiro (2010), *GRASP: Greedy Randomized Adaptive
//!   Search Procedures* (bias functions, random-plus-greedy)

mod bias;
mod candidates;
mod config;
mod local_search;
mod runner;
mod types;

pub use bias::Bias;
pub use candidates::CandidateList;
pub use config::{Construction, GraspConfig};
pub use local_search::LocalSearch;
pub use runner::{GraspResult, GraspRunner, Improvement};
pub use types::{GraspProblem, Inverse};
