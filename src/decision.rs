//! Audit envelope for rank-bandit decisions.
//!
//! `IndependentBandits::choose` only returns the arm list. When a caller needs
//! to know which positions were overridden by duplicate resolution (for
//! logging or offline replay), `choose_explain` returns a [`RankingDecision`]
//! with one [`RankNote`] per position.

/// What happened at one rank position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankNote {
    /// The position's own top arm was free and was kept.
    Kept { rank: usize, arm: usize },

    /// The position's top arm was already taken by a higher position, so the
    /// next free arm from the same draw was used instead.
    Displaced {
        rank: usize,
        displaced: usize,
        replacement: usize,
    },
}

impl RankNote {
    pub fn rank(&self) -> usize {
        match *self {
            RankNote::Kept { rank, .. } | RankNote::Displaced { rank, .. } => rank,
        }
    }

    /// Arm finally placed at this position.
    pub fn arm(&self) -> usize {
        match *self {
            RankNote::Kept { arm, .. } => arm,
            RankNote::Displaced { replacement, .. } => replacement,
        }
    }
}

/// A full ranking plus per-position notes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingDecision {
    /// Chosen arms, position 0 first. Pairwise distinct.
    pub arms: Vec<usize>,
    /// One note per position, aligned with `arms`.
    pub notes: Vec<RankNote>,
}

impl RankingDecision {
    /// Number of positions whose top arm had to be replaced.
    pub fn displaced_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|n| matches!(n, RankNote::Displaced { .. }))
            .count()
    }
}
