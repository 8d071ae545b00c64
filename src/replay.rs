//! Offline replay of a rank bandit against logged relevance.
//!
//! This reproduces the sequential recommendation experiment the bandits were
//! built for: each step picks a logged user at random, recommends a ranking,
//! and rewards every recommended item the user actually liked. With
//! `sequential` enabled the same user is then replayed item by item, passing
//! the user's previous liked item as `previous_action`, which is the signal
//! [`DirichletThompsonSampling`][crate::DirichletThompsonSampling] learns from.
//!
//! Loading and plotting data are left to the caller.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{BanditError, Context, RankBandit, Result};

/// Missing-rating sentinel used by the Jester ratings dump.
pub const MISSING_RATING: f64 = 99.0;

/// Replay configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayConfig {
    /// Number of user draws.
    pub steps: usize,
    /// Seed for the user-sampling RNG (the policy owns its own RNG).
    pub seed: u64,
    /// Users with fewer relevant items are dropped (must be >= 1).
    pub min_relevant: usize,
    /// Replay each user's liked items as a chain of `previous_action` contexts.
    pub sequential: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            steps: 1_000,
            seed: 0,
            min_relevant: 2,
            sequential: true,
        }
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayReport {
    /// Running mean of the per-user hit rate after each step.
    pub ctr: Vec<f64>,
    /// Users kept after filtering.
    pub users: usize,
    /// Total `choose`/`update` rounds played.
    pub rounds: usize,
}

impl ReplayReport {
    /// Hit rate after the last step (`0.0` for an empty replay).
    pub fn final_ctr(&self) -> f64 {
        self.ctr.last().copied().unwrap_or(0.0)
    }
}

/// Turn raw ratings into 0/1 relevance.
///
/// A rating is relevant (1.0) when it is at least `threshold`. Missing
/// ratings ([`MISSING_RATING`] or NaN) count as not relevant.
pub fn binarize_ratings(rows: &[Vec<f64>], threshold: f64) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|&r| {
                    if r.is_nan() || r == MISSING_RATING || r < threshold {
                        0.0
                    } else {
                        1.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Replay `relevance` (one row per user, one column per arm) through `policy`.
///
/// A round is a hit when any recommended arm is relevant; a user's score is
/// hits divided by rounds played for that user.
pub fn replay<R: RankBandit>(
    policy: &mut R,
    relevance: &[Vec<f64>],
    cfg: &ReplayConfig,
) -> Result<ReplayReport> {
    if cfg.min_relevant == 0 {
        return Err(BanditError::InvalidConfig("min_relevant must be >= 1"));
    }
    let num_arms = policy.num_arms();
    let mut users: Vec<Vec<usize>> = Vec::new();
    for (row, values) in relevance.iter().enumerate() {
        if values.len() != num_arms {
            return Err(BanditError::DatasetShape {
                row,
                len: values.len(),
                num_arms,
            });
        }
        let liked: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0.0)
            .map(|(arm, _)| arm)
            .collect();
        if liked.len() >= cfg.min_relevant {
            users.push(liked);
        }
    }
    if users.is_empty() {
        return Err(BanditError::EmptyDataset);
    }
    tracing::debug!(users = users.len(), dropped = relevance.len() - users.len(), "replay dataset");

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut ctr = Vec::with_capacity(cfg.steps);
    let mut rounds = 0usize;
    let mut score_sum = 0.0;
    for step in 1..=cfg.steps {
        let liked = &users[rng.random_range(0..users.len())];

        let mut hits = usize::from(play_round(policy, liked, None)?);
        let mut played = 1usize;
        if cfg.sequential {
            for &previous in &liked[..liked.len() - 1] {
                let ctx = Context::with_previous_action(previous);
                hits += usize::from(play_round(policy, liked, Some(&ctx))?);
                played += 1;
            }
        }
        rounds += played;
        score_sum += hits as f64 / played as f64;
        ctr.push(score_sum / step as f64);
    }

    let report = ReplayReport {
        ctr,
        users: users.len(),
        rounds,
    };
    tracing::info!(
        steps = cfg.steps,
        rounds = report.rounds,
        ctr = report.final_ctr(),
        "replay finished"
    );
    Ok(report)
}

/// One choose/update round; returns whether any chosen arm was liked.
fn play_round<R: RankBandit>(
    policy: &mut R,
    liked: &[usize],
    context: Option<&Context>,
) -> Result<bool> {
    let chosen = policy.choose(context)?;
    let rewards: Vec<f64> = chosen
        .iter()
        .map(|arm| if liked.contains(arm) { 1.0 } else { 0.0 })
        .collect();
    policy.update(&chosen, &rewards, context)?;
    Ok(rewards.iter().any(|&r| r > 0.0))
}
