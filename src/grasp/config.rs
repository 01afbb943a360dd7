//! GRASP configuration: greediness, budgets, and phase strategies.

use super::bias::Bias;
use super::local_search::LocalSearch;
use std::time::Duration;

/// Constructive-phase mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Construction {
    /// Plain GRASP construction: `alpha` stays fixed for the whole run.
    #[default]
    Standard,
    /// Random-plus-greedy: `alpha` is forced to 1.0 (fully random) for
    /// the first `random_steps` construction steps, then to 0.0 (fully
    /// greedy) for the remainder.
    ///
    /// Reference: Resende & Ribeiro (2010), §3.2
    RandomPlusGreedy {
        /// Construction steps taken at `alpha = 1.0` before the switch.
        random_steps: usize,
    },
}

/// Configuration for a GRASP run.
///
/// # Examples
///
/// ```
/// use grasp_qbfpt::grasp::{Bias, GraspConfig, LocalSearch};
/// use std::time::Duration;
///
/// let config = GraspConfig::default()
///     .with_alpha(0.15)
///     .with_max_iterations(500)
///     .with_time_limit(Duration::from_secs(1800))
///     .with_local_search(LocalSearch::FirstImproving)
///     .with_bias(Bias::Linear)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Greediness-randomness parameter in [0, 1]: 0 is fully greedy
    /// (RCL holds only the best deltas), 1 fully random (RCL holds the
    /// whole candidate list). Ignored while a
    /// [`Construction::RandomPlusGreedy`] phase forces its own value.
    pub alpha: f64,

    /// Maximum number of GRASP iterations (construct + local search).
    pub max_iterations: usize,

    /// Wall-clock budget. Checked between iterations only — a running
    /// iteration always completes. `None` means no time limit.
    pub time_limit: Option<Duration>,

    /// Constructive-phase mode.
    pub construction: Construction,

    /// Local-search strategy.
    pub local_search: LocalSearch,

    /// Bias family for randomized RCL selection.
    pub bias: Bias,

    /// Random seed. The same seed and configuration reproduce a run
    /// bit-for-bit; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            max_iterations: 1000,
            time_limit: None,
            construction: Construction::default(),
            local_search: LocalSearch::default(),
            bias: Bias::default(),
            seed: None,
        }
    }
}

impl GraspConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_local_search(mut self, local_search: LocalSearch) -> Self {
        self.local_search = local_search;
        self
    }

    pub fn with_bias(mut self, bias: Bias) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        Ok(())
    }
}
