//! Deterministic seed derivation for the per-position bandits of a rank bandit.
//!
//! Not cryptographic. Each position gets its own RNG stream so that positions
//! are decorrelated, while the whole rank bandit stays reproducible from one seed.

/// Seed for rank position `rank` under the rank bandit seed `seed`.
#[must_use]
pub fn rank_seed(seed: u64, rank: usize) -> u64 {
    // "RANK" tag keeps position 0 distinct from the raw seed.
    splitmix64(seed ^ 0x5241_4E4B ^ (rank as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_get_distinct_reproducible_seeds() {
        let seeds: Vec<u64> = (0..16).map(|r| rank_seed(42, r)).collect();
        let again: Vec<u64> = (0..16).map(|r| rank_seed(42, r)).collect();
        assert_eq!(seeds, again);

        let mut dedup = seeds.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), seeds.len());
        assert_ne!(rank_seed(42, 0), 42);
    }
}
