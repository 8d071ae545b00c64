//! The multi-position [`RankBandit`] trait.
//!
//! A rank bandit owns one [`Bandit`] per output position, all built with the
//! same arm count and hyperparameters. How positions are combined into one
//! duplicate-free list is up to the implementor (`choose`); routing feedback
//! back to positions is shared (`update`).

use crate::{Bandit, BanditError, Context, Result};

/// Common interface for ranking policies built from per-position bandits.
pub trait RankBandit {
    /// Per-position bandit type.
    type Policy: Bandit;

    /// Per-position bandits; index `i` serves rank position `i` (0 = top).
    fn rank_bandits(&self) -> &[Self::Policy];

    fn rank_bandits_mut(&mut self) -> &mut [Self::Policy];

    fn num_ranks(&self) -> usize {
        self.rank_bandits().len()
    }

    fn num_arms(&self) -> usize {
        self.rank_bandits().first().map_or(0, |b| b.num_arms())
    }

    /// Choose one arm per position, position 0 first, without duplicates.
    fn choose(&mut self, context: Option<&Context>) -> Result<Vec<usize>>;

    /// Route feedback positionally: `(selected[i], rewards[i])` goes to the
    /// bandit at position `i` only.
    ///
    /// `selected` and `rewards` must have equal length, at most `num_ranks`.
    /// Positions past the supplied lists are left untouched. Arms and rewards
    /// are checked for every position before any position is updated.
    fn update(
        &mut self,
        selected: &[usize],
        rewards: &[f64],
        context: Option<&Context>,
    ) -> Result<()> {
        if selected.len() != rewards.len() {
            return Err(BanditError::LengthMismatch {
                arms: selected.len(),
                rewards: rewards.len(),
            });
        }
        let num_ranks = self.num_ranks();
        if selected.len() > num_ranks {
            return Err(BanditError::TooManyPositions {
                positions: selected.len(),
                num_ranks,
            });
        }
        for ((&arm, &reward), bandit) in selected.iter().zip(rewards).zip(self.rank_bandits()) {
            if arm >= bandit.num_arms() {
                return Err(BanditError::ArmOutOfRange {
                    arm,
                    num_arms: bandit.num_arms(),
                });
            }
            if !reward.is_finite() {
                return Err(BanditError::NonFiniteReward { arm, reward });
            }
        }

        for ((&arm, &reward), bandit) in selected
            .iter()
            .zip(rewards)
            .zip(self.rank_bandits_mut())
        {
            bandit.update(arm, reward, context)?;
        }
        Ok(())
    }
}
