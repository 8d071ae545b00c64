//! The single-position [`Bandit`] trait.
//!
//! A bandit owns all per-arm state for one rank position. It answers `choose`
//! with a full ranking drawn from one posterior sample, and folds rewards back
//! in through `update`. Both [`BetaThompsonSampling`][crate::BetaThompsonSampling]
//! and [`DirichletThompsonSampling`][crate::DirichletThompsonSampling] implement
//! it, so rank compositions can be generic over the per-position policy.
//!
//! # Example
//!
//! ```rust
//! use mab_ranking::{Bandit, BetaThompsonConfig, BetaThompsonSampling};
//!
//! fn play<B: Bandit>(bandit: &mut B, rounds: usize) -> mab_ranking::Result<()> {
//!     for _ in 0..rounds {
//!         let choice = bandit.choose(None)?;
//!         let reward = if choice.best == 0 { 1.0 } else { 0.0 };
//!         bandit.update(choice.best, reward, None)?;
//!     }
//!     Ok(())
//! }
//!
//! let mut ts = BetaThompsonSampling::with_seed(4, BetaThompsonConfig::default(), 7).unwrap();
//! play(&mut ts, 50).unwrap();
//! ```

use crate::{Context, Result};

/// One stochastic ranking of all arms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    /// Top arm; always `ranked[0]`.
    pub best: usize,
    /// Permutation of `0..num_arms`, most preferred first.
    pub ranked: Vec<usize>,
    /// Score each arm was ranked by in this draw, indexed by arm id.
    pub samples: Vec<f64>,
}

impl Choice {
    pub(crate) fn from_samples(samples: Vec<f64>) -> Self {
        let ranked = crate::rank_descending(&samples);
        Self {
            best: ranked[0],
            ranked,
            samples,
        }
    }
}

/// Common interface for single-position arm-selection policies.
///
/// Instances are not synchronized: callers sharing one across threads must
/// serialize access themselves.
pub trait Bandit {
    /// Hyperparameters shared by every instance a rank bandit builds.
    type Config: Clone;

    /// Build a bandit over `num_arms` arms with its own seeded RNG.
    ///
    /// Fails with [`BanditError::NoArms`][crate::BanditError::NoArms] when
    /// `num_arms == 0`, or `InvalidConfig` when `cfg` is unusable.
    fn with_seed(num_arms: usize, cfg: Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    fn num_arms(&self) -> usize;

    /// Draw one posterior sample and rank every arm by it.
    ///
    /// Only the RNG advances; the posterior itself is left untouched.
    fn choose(&mut self, context: Option<&Context>) -> Result<Choice>;

    /// Fold one observed reward for `arm` into the posterior.
    ///
    /// Rewards are expected in `[0, 1]` and are not clamped. Non-finite
    /// rewards and out-of-range arms are rejected without touching state.
    fn update(&mut self, arm: usize, reward: f64, context: Option<&Context>) -> Result<()>;
}
