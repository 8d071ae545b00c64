//! Beta-posterior Thompson sampling over independent arms.
//!
//! Each arm keeps a Beta posterior parameterized by accumulated `rewards`
//! (successes) and `num_tries` (successes + failures):
//! `alpha = rewards[i]`, `beta = num_tries[i] - rewards[i]`.
//! Context is accepted for interface compatibility and ignored.
//!
//! Notes:
//! - This policy is **seedable**; `new` uses seed 0 (deterministic by default).
//! - Rewards are not clamped. Rewards outside `[0, 1]` can drive a posterior
//!   parameter to zero or below, which `choose` reports as
//!   [`BanditError::InvalidDistribution`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Beta, Distribution};

use crate::{Bandit, BanditError, Choice, Context, Result};

/// Prior for Beta Thompson sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaThompsonConfig {
    /// Initial `rewards` per arm (prior alpha, must be > 0).
    pub prior_rewards: f64,
    /// Initial `num_tries` per arm (prior alpha + beta, must exceed `prior_rewards`).
    pub prior_tries: f64,
}

impl Default for BetaThompsonConfig {
    fn default() -> Self {
        Self {
            prior_rewards: 1.0,
            prior_tries: 2.0,
        }
    }
}

impl BetaThompsonConfig {
    fn validate(&self) -> Result<()> {
        if !(self.prior_rewards.is_finite() && self.prior_rewards > 0.0) {
            return Err(BanditError::InvalidConfig("prior_rewards must be finite and > 0"));
        }
        if !(self.prior_tries.is_finite() && self.prior_tries > self.prior_rewards) {
            return Err(BanditError::InvalidConfig(
                "prior_tries must be finite and > prior_rewards",
            ));
        }
        Ok(())
    }
}

/// Seedable Beta Thompson-sampling bandit.
#[derive(Debug, Clone)]
pub struct BetaThompsonSampling {
    cfg: BetaThompsonConfig,
    rewards: Vec<f64>,
    num_tries: Vec<f64>,
    rng: StdRng,
}

impl BetaThompsonSampling {
    /// Create a bandit with a deterministic fixed seed (0).
    pub fn new(num_arms: usize, cfg: BetaThompsonConfig) -> Result<Self> {
        Self::with_seed(num_arms, cfg, 0)
    }

    /// Create a bandit with an explicit seed (reproducible).
    pub fn with_seed(num_arms: usize, cfg: BetaThompsonConfig, seed: u64) -> Result<Self> {
        if num_arms == 0 {
            return Err(BanditError::NoArms);
        }
        cfg.validate()?;
        Ok(Self {
            cfg,
            rewards: vec![cfg.prior_rewards; num_arms],
            num_tries: vec![cfg.prior_tries; num_arms],
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Accumulated successes per arm (prior included).
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Accumulated tries per arm (prior included).
    pub fn num_tries(&self) -> &[f64] {
        &self.num_tries
    }

    /// Posterior mean `rewards / num_tries` for `arm`.
    pub fn expected_value(&self, arm: usize) -> Result<f64> {
        self.check_arm(arm)?;
        Ok(self.rewards[arm] / self.num_tries[arm])
    }

    /// Return every arm to the prior.
    pub fn reset(&mut self) {
        self.rewards.fill(self.cfg.prior_rewards);
        self.num_tries.fill(self.cfg.prior_tries);
    }

    fn check_arm(&self, arm: usize) -> Result<()> {
        if arm >= self.rewards.len() {
            return Err(BanditError::ArmOutOfRange {
                arm,
                num_arms: self.rewards.len(),
            });
        }
        Ok(())
    }

    fn sample_arm(&mut self, arm: usize) -> Result<f64> {
        let alpha = self.rewards[arm];
        let beta = self.num_tries[arm] - alpha;
        let invalid = BanditError::InvalidDistribution { arm, alpha, beta };
        if !(alpha.is_finite() && beta.is_finite()) || alpha <= 0.0 || beta <= 0.0 {
            return Err(invalid);
        }
        let dist = Beta::new(alpha, beta).map_err(|_| invalid)?;
        Ok(dist.sample(&mut self.rng))
    }
}

impl Bandit for BetaThompsonSampling {
    type Config = BetaThompsonConfig;

    fn with_seed(num_arms: usize, cfg: BetaThompsonConfig, seed: u64) -> Result<Self> {
        BetaThompsonSampling::with_seed(num_arms, cfg, seed)
    }

    fn num_arms(&self) -> usize {
        self.rewards.len()
    }

    fn choose(&mut self, _context: Option<&Context>) -> Result<Choice> {
        let samples = (0..self.rewards.len())
            .map(|arm| self.sample_arm(arm))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Choice::from_samples(samples))
    }

    fn update(&mut self, arm: usize, reward: f64, _context: Option<&Context>) -> Result<()> {
        self.check_arm(arm)?;
        if !reward.is_finite() {
            return Err(BanditError::NonFiniteReward { arm, reward });
        }
        self.num_tries[arm] += 1.0;
        self.rewards[arm] += reward;
        tracing::trace!(arm, reward, "beta thompson update");
        Ok(())
    }
}
