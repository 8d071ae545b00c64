//! Error taxonomy for bandit construction, selection and feedback.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Everything that can go wrong when building, querying or updating a bandit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BanditError {
    #[error("a bandit needs at least one arm")]
    NoArms,

    #[error("a rank bandit needs at least one rank position")]
    NoRanks,

    #[error("arm {arm} out of range (num_arms = {num_arms})")]
    ArmOutOfRange { arm: usize, num_arms: usize },

    #[error("previous_action {previous_action} out of range (num_arms = {num_arms})")]
    PreviousActionOutOfRange {
        previous_action: usize,
        num_arms: usize,
    },

    #[error("context key `{key}` has non-integer value `{value}`")]
    InvalidContext { key: String, value: String },

    #[error("cannot rank {num_ranks} positions without duplicates from {num_arms} arms")]
    InfeasibleRanking { num_ranks: usize, num_arms: usize },

    #[error("invalid Beta parameters for arm {arm}: alpha = {alpha}, beta = {beta}")]
    InvalidDistribution { arm: usize, alpha: f64, beta: f64 },

    #[error("invalid Gamma shape at row {row}, arm {arm}: {shape}")]
    InvalidStrength { row: usize, arm: usize, shape: f64 },

    #[error("Gamma draws for row {row} do not normalize (sum is zero or not finite)")]
    DegenerateSample { row: usize },

    #[error("reward for arm {arm} is not finite: {reward}")]
    NonFiniteReward { arm: usize, reward: f64 },

    #[error("got {arms} arms but {rewards} rewards")]
    LengthMismatch { arms: usize, rewards: usize },

    #[error("feedback for {positions} positions exceeds num_ranks = {num_ranks}")]
    TooManyPositions { positions: usize, num_ranks: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("no rows left to replay after filtering")]
    EmptyDataset,

    #[error("row {row} has {len} columns, expected num_arms = {num_arms}")]
    DatasetShape { row: usize, len: usize, num_arms: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e = BanditError::ArmOutOfRange { arm: 9, num_arms: 4 };
        assert_eq!(e.to_string(), "arm 9 out of range (num_arms = 4)");

        let e = BanditError::InfeasibleRanking {
            num_ranks: 5,
            num_arms: 3,
        };
        assert!(e.to_string().contains("5 positions"));
    }
}
