//! Independent per-position bandits with duplicate resolution.
//!
//! Each position draws its own ranking. Positions are filled top-down; when a
//! position's best arm is already taken by a higher position, the next free
//! arm in that same position's ranking is used instead.
//!
//! Every position sees the caller's context unchanged. Chaining a position's
//! pick into the next position's `previous_action` is left to the caller.

use crate::decision::{RankNote, RankingDecision};
use crate::seed::rank_seed;
use crate::{Bandit, BanditError, Context, RankBandit, Result};

/// First arm in `ranked` that is not yet in `selected`.
pub fn find_next_possible_arm(selected: &[usize], ranked: &[usize]) -> Option<usize> {
    ranked.iter().copied().find(|arm| !selected.contains(arm))
}

/// Rank bandit of independently learning positions.
#[derive(Debug, Clone)]
pub struct IndependentBandits<B> {
    rank_bandits: Vec<B>,
}

impl<B: Bandit> IndependentBandits<B> {
    /// Create `num_ranks` bandits over `num_arms` arms with a deterministic seed (0).
    pub fn new(num_ranks: usize, num_arms: usize, cfg: B::Config) -> Result<Self> {
        Self::with_seed(num_ranks, num_arms, cfg, 0)
    }

    /// Create `num_ranks` bandits, seeding position `i` from `(seed, i)`.
    pub fn with_seed(num_ranks: usize, num_arms: usize, cfg: B::Config, seed: u64) -> Result<Self> {
        if num_ranks == 0 {
            return Err(BanditError::NoRanks);
        }
        let rank_bandits = (0..num_ranks)
            .map(|rank| B::with_seed(num_arms, cfg.clone(), rank_seed(seed, rank)))
            .collect::<Result<Vec<B>>>()?;
        Ok(Self { rank_bandits })
    }

    /// Like [`RankBandit::choose`], with a note per position.
    pub fn choose_explain(&mut self, context: Option<&Context>) -> Result<RankingDecision> {
        let num_ranks = self.rank_bandits.len();
        let num_arms = self.num_arms();
        if num_arms < num_ranks {
            return Err(BanditError::InfeasibleRanking {
                num_ranks,
                num_arms,
            });
        }

        let mut arms: Vec<usize> = Vec::with_capacity(num_ranks);
        let mut notes: Vec<RankNote> = Vec::with_capacity(num_ranks);
        for (rank, bandit) in self.rank_bandits.iter_mut().enumerate() {
            let choice = bandit.choose(context)?;
            let note = if arms.contains(&choice.best) {
                // A permutation of at least `num_ranks` arms always has a free one.
                let replacement = find_next_possible_arm(&arms, &choice.ranked).ok_or(
                    BanditError::InfeasibleRanking {
                        num_ranks,
                        num_arms,
                    },
                )?;
                tracing::debug!(rank, displaced = choice.best, replacement, "duplicate arm displaced");
                RankNote::Displaced {
                    rank,
                    displaced: choice.best,
                    replacement,
                }
            } else {
                RankNote::Kept {
                    rank,
                    arm: choice.best,
                }
            };
            arms.push(note.arm());
            notes.push(note);
        }
        Ok(RankingDecision { arms, notes })
    }
}

impl<B: Bandit> RankBandit for IndependentBandits<B> {
    type Policy = B;

    fn rank_bandits(&self) -> &[B] {
        &self.rank_bandits
    }

    fn rank_bandits_mut(&mut self) -> &mut [B] {
        &mut self.rank_bandits
    }

    /// Fails with [`BanditError::InfeasibleRanking`] when `num_arms < num_ranks`.
    fn choose(&mut self, context: Option<&Context>) -> Result<Vec<usize>> {
        self.choose_explain(context).map(|d| d.arms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BetaThompsonConfig, BetaThompsonSampling, DirichletThompsonConfig,
        DirichletThompsonSampling,
    };

    fn beta_ranker(num_ranks: usize, num_arms: usize) -> IndependentBandits<BetaThompsonSampling> {
        IndependentBandits::new(num_ranks, num_arms, BetaThompsonConfig::default()).unwrap()
    }

    #[test]
    fn choose_is_duplicate_free_and_full_length() {
        let mut r = beta_ranker(3, 10);
        for _ in 0..50 {
            let arms = r.choose(None).unwrap();
            assert_eq!(arms.len(), 3);
            let mut d = arms.clone();
            d.sort_unstable();
            d.dedup();
            assert_eq!(d.len(), 3);
        }
    }

    #[test]
    fn uses_every_arm_when_ranks_equal_arms() {
        let mut r = beta_ranker(4, 4);
        let mut arms = r.choose(None).unwrap();
        arms.sort_unstable();
        assert_eq!(arms, vec![0, 1, 2, 3]);
    }

    #[test]
    fn update_routes_feedback_by_position() {
        let mut r = beta_ranker(3, 8);
        r.update(&[0, 1, 2], &[1.0, 0.0, 0.0], None).unwrap();

        let b = r.rank_bandits();
        assert_eq!(b[0].rewards(), &[2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(b[0].num_tries(), &[3.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0]);
        assert_eq!(b[1].rewards(), &[1.0; 8]);
        assert_eq!(b[1].num_tries()[1], 3.0);
        assert_eq!(b[2].num_tries()[2], 3.0);
    }

    #[test]
    fn partial_feedback_leaves_lower_positions_alone() {
        let mut r = beta_ranker(3, 5);
        r.update(&[4], &[1.0], None).unwrap();
        assert_eq!(r.rank_bandits()[0].rewards()[4], 2.0);
        for b in &r.rank_bandits()[1..] {
            assert_eq!(b.rewards(), &[1.0; 5]);
            assert_eq!(b.num_tries(), &[2.0; 5]);
        }
    }

    #[test]
    fn rejected_update_mutates_nothing() {
        let mut r = beta_ranker(3, 5);
        assert_eq!(
            r.update(&[0, 1], &[1.0], None),
            Err(BanditError::LengthMismatch { arms: 2, rewards: 1 })
        );
        assert_eq!(
            r.update(&[0, 1, 2, 3], &[1.0; 4], None),
            Err(BanditError::TooManyPositions {
                positions: 4,
                num_ranks: 3
            })
        );
        assert_eq!(
            r.update(&[0, 9], &[1.0, 1.0], None),
            Err(BanditError::ArmOutOfRange { arm: 9, num_arms: 5 })
        );
        assert!(matches!(
            r.update(&[0, 1], &[1.0, f64::INFINITY], None),
            Err(BanditError::NonFiniteReward { arm: 1, .. })
        ));
        for b in r.rank_bandits() {
            assert_eq!(b.num_tries(), &[2.0; 5]);
        }
    }

    #[test]
    fn bad_context_rejects_rank_update_untouched() {
        let mut r: IndependentBandits<DirichletThompsonSampling> =
            IndependentBandits::new(2, 4, DirichletThompsonConfig::default()).unwrap();
        let ctx: Context = [(crate::PREVIOUS_ACTION, "x")].into_iter().collect();
        assert!(matches!(
            r.update(&[0, 1], &[1.0, 1.0], Some(&ctx)),
            Err(BanditError::InvalidContext { .. })
        ));
        assert!(matches!(
            r.choose(Some(&ctx)),
            Err(BanditError::InvalidContext { .. })
        ));
        for b in r.rank_bandits() {
            for row in 0..4 {
                assert_eq!(b.row(row).unwrap(), &[1.0; 4]);
            }
        }
    }

    #[test]
    fn infeasible_ranking_is_reported() {
        let mut r = beta_ranker(5, 3);
        assert_eq!(
            r.choose(None),
            Err(BanditError::InfeasibleRanking {
                num_ranks: 5,
                num_arms: 3
            })
        );
    }

    #[test]
    fn construction_rejects_zero_sizes() {
        assert_eq!(
            IndependentBandits::<BetaThompsonSampling>::new(0, 4, BetaThompsonConfig::default())
                .unwrap_err(),
            BanditError::NoRanks
        );
        assert_eq!(
            IndependentBandits::<BetaThompsonSampling>::new(2, 0, BetaThompsonConfig::default())
                .unwrap_err(),
            BanditError::NoArms
        );
    }

    #[test]
    fn find_next_possible_arm_skips_taken() {
        assert_eq!(find_next_possible_arm(&[3, 1], &[3, 1, 0, 2]), Some(0));
        assert_eq!(find_next_possible_arm(&[], &[2, 0]), Some(2));
        assert_eq!(find_next_possible_arm(&[0, 1], &[1, 0]), None);
    }

    #[test]
    fn explain_notes_match_arms() {
        // Two positions that share a strongly preferred arm: position 1 must be displaced.
        let mut r = beta_ranker(2, 3);
        for _ in 0..1000 {
            r.update(&[2, 2], &[1.0, 1.0], None).unwrap();
        }
        let d = r.choose_explain(None).unwrap();
        assert_eq!(d.notes.len(), 2);
        for (i, n) in d.notes.iter().enumerate() {
            assert_eq!(n.rank(), i);
            assert_eq!(n.arm(), d.arms[i]);
        }
        assert_eq!(d.arms[0], 2);
        assert!(matches!(
            d.notes[1],
            RankNote::Displaced { rank: 1, displaced: 2, .. }
        ));
        assert_eq!(d.displaced_count(), 1);
    }

    #[test]
    fn positions_are_seeded_independently() {
        let mut r = beta_ranker(2, 50);
        let (a, b) = {
            let bs = r.rank_bandits_mut();
            let a = bs[0].choose(None).unwrap().ranked;
            let b = bs[1].choose(None).unwrap().ranked;
            (a, b)
        };
        assert_ne!(a, b);
    }

    #[test]
    fn dirichlet_positions_share_context() {
        let mut r: IndependentBandits<DirichletThompsonSampling> =
            IndependentBandits::with_seed(3, 6, DirichletThompsonConfig::default(), 4).unwrap();
        let ctx = Context::with_previous_action(2);
        let arms = r.choose(Some(&ctx)).unwrap();
        r.update(&arms, &[1.0, 0.0, 0.0], Some(&ctx)).unwrap();

        let mass = |b: &DirichletThompsonSampling| -> f64 {
            (0..6).map(|row| b.row(row).unwrap().iter().sum::<f64>()).sum()
        };
        let bs = r.rank_bandits();
        // Chained reward 1.0 lands on three cells of the top position only.
        assert!((mass(&bs[0]) - 39.0).abs() < 1e-12);
        assert!((mass(&bs[1]) - 36.0).abs() < 1e-12);
        assert!((mass(&bs[2]) - 36.0).abs() < 1e-12);
        assert_eq!(bs[0].strength(2, arms[0]).unwrap(), bs[0].strength(arms[0], 2).unwrap());
    }
}
