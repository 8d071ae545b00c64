//! Score helpers: ordering arms by a sampled score and self-normalizing draws.

/// Arm indices ordered by descending score.
///
/// The sort is stable, so equal scores keep ascending arm order. Scores are
/// compared with `total_cmp`, which keeps the order well defined even if a NaN
/// slips through.
pub fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Divide every value by the total so the result sums to one.
///
/// Returns `None` when the total is zero, negative or not finite.
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }
    Some(values.iter().map(|v| v / total).collect())
}
