//! Transition-aware Thompson sampling with a Dirichlet posterior per context row.
//!
//! The state is a dense `num_arms x num_arms` matrix of transition strengths.
//! Row `r` is the Dirichlet concentration over the next arm given that `r` was
//! the previous action; row `0` doubles as the "no previous action" row. A row
//! is sampled with the Gamma construction:
//!
//! ```text
//!   g_i ~ Gamma(strength[r][i], 1)
//!   p_i = g_i / sum_j g_j
//! ```
//!
//! With a previous action `p != 0`, the ranking score is the elementwise
//! product of the row-`p` sample and an independent row-`0` sample, so an arm
//! needs to be both a plausible successor of `p` and plausible overall.
//!
//! Feedback for `arm` under previous action `p` adds the reward to
//! `strength[p][arm]` and `strength[arm][p]`, and, when `p != 0`, also to
//! `strength[0][p]` so chained arms stay reachable from the base row. When
//! `p == arm` the diagonal cell is credited twice.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Gamma};

use crate::context::previous_action;
use crate::{normalize, Bandit, BanditError, Choice, Context, Result};

/// Prior for Dirichlet Thompson sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirichletThompsonConfig {
    /// Initial strength of every matrix cell (Gamma shape, must be > 0).
    pub prior_strength: f64,
}

impl Default for DirichletThompsonConfig {
    fn default() -> Self {
        Self {
            prior_strength: 1.0,
        }
    }
}

/// Seedable Dirichlet Thompson-sampling bandit.
#[derive(Debug, Clone)]
pub struct DirichletThompsonSampling {
    cfg: DirichletThompsonConfig,
    num_arms: usize,
    // Row-major `num_arms * num_arms`.
    strengths: Vec<f64>,
    rng: StdRng,
}

impl DirichletThompsonSampling {
    /// Create a bandit with a deterministic fixed seed (0).
    pub fn new(num_arms: usize, cfg: DirichletThompsonConfig) -> Result<Self> {
        Self::with_seed(num_arms, cfg, 0)
    }

    /// Create a bandit with an explicit seed (reproducible).
    pub fn with_seed(num_arms: usize, cfg: DirichletThompsonConfig, seed: u64) -> Result<Self> {
        if num_arms == 0 {
            return Err(BanditError::NoArms);
        }
        if !(cfg.prior_strength.is_finite() && cfg.prior_strength > 0.0) {
            return Err(BanditError::InvalidConfig(
                "prior_strength must be finite and > 0",
            ));
        }
        let cells = num_arms
            .checked_mul(num_arms)
            .ok_or(BanditError::InvalidConfig("num_arms too large for a dense matrix"))?;
        Ok(Self {
            cfg,
            num_arms,
            strengths: vec![cfg.prior_strength; cells],
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Transition strength from `from` (previous action) to `to`.
    pub fn strength(&self, from: usize, to: usize) -> Result<f64> {
        self.check_arm(from)?;
        self.check_arm(to)?;
        Ok(self.strengths[self.idx(from, to)])
    }

    /// Strengths of every transition out of `from`.
    pub fn row(&self, from: usize) -> Result<&[f64]> {
        self.check_arm(from)?;
        let start = from * self.num_arms;
        Ok(&self.strengths[start..start + self.num_arms])
    }

    /// Return every cell to the prior.
    pub fn reset(&mut self) {
        self.strengths.fill(self.cfg.prior_strength);
    }

    #[inline]
    fn idx(&self, from: usize, to: usize) -> usize {
        from * self.num_arms + to
    }

    fn check_arm(&self, arm: usize) -> Result<()> {
        if arm >= self.num_arms {
            return Err(BanditError::ArmOutOfRange {
                arm,
                num_arms: self.num_arms,
            });
        }
        Ok(())
    }

    fn check_previous(&self, previous: usize) -> Result<()> {
        if previous >= self.num_arms {
            return Err(BanditError::PreviousActionOutOfRange {
                previous_action: previous,
                num_arms: self.num_arms,
            });
        }
        Ok(())
    }

    /// One Dirichlet draw for `row` via normalized Gamma samples.
    fn sample_row(&mut self, row: usize) -> Result<Vec<f64>> {
        let mut draws = Vec::with_capacity(self.num_arms);
        for arm in 0..self.num_arms {
            let shape = self.strengths[self.idx(row, arm)];
            let invalid = BanditError::InvalidStrength { row, arm, shape };
            if !(shape.is_finite() && shape > 0.0) {
                return Err(invalid);
            }
            let dist = Gamma::new(shape, 1.0).map_err(|_| invalid)?;
            draws.push(dist.sample(&mut self.rng));
        }
        normalize(&draws).ok_or(BanditError::DegenerateSample { row })
    }
}

impl Bandit for DirichletThompsonSampling {
    type Config = DirichletThompsonConfig;

    fn with_seed(num_arms: usize, cfg: DirichletThompsonConfig, seed: u64) -> Result<Self> {
        DirichletThompsonSampling::with_seed(num_arms, cfg, seed)
    }

    fn num_arms(&self) -> usize {
        self.num_arms
    }

    fn choose(&mut self, context: Option<&Context>) -> Result<Choice> {
        let previous = previous_action(context)?;
        self.check_previous(previous)?;

        let mut probs = self.sample_row(previous)?;
        if previous != 0 {
            let base = self.sample_row(0)?;
            for (p, b) in probs.iter_mut().zip(&base) {
                *p *= b;
            }
        }
        Ok(Choice::from_samples(probs))
    }

    fn update(&mut self, arm: usize, reward: f64, context: Option<&Context>) -> Result<()> {
        let previous = previous_action(context)?;
        self.check_arm(arm)?;
        self.check_previous(previous)?;
        if !reward.is_finite() {
            return Err(BanditError::NonFiniteReward { arm, reward });
        }

        let forward = self.idx(previous, arm);
        let backward = self.idx(arm, previous);
        self.strengths[forward] += reward;
        self.strengths[backward] += reward;
        if previous != 0 {
            let base = self.idx(0, previous);
            self.strengths[base] += reward;
        }
        tracing::trace!(arm, previous, reward, "dirichlet thompson update");
        Ok(())
    }
}
