//! Per-player aggregate computation.
//!
//! Aggregates are always derived from the full persisted score history in
//! one pass, inside the same transaction as the score write. Incremental
//! patching is deliberately avoided: under concurrent writers the history
//! is the only source of truth that cannot drift.

/// Round a value to 2 decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregates of one player's session, derived from their score history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAggregates {
    /// Sum of all round scores.
    pub total_score: i32,
    /// Number of rounds with a submitted score.
    pub attempts: i32,
    /// Best single-round score.
    pub best_score: i32,
    /// Mean round score, rounded to 2 decimals.
    pub session_score: f64,
    /// Scores in round order.
    pub round_scores: Vec<i32>,
}

/// Compute aggregates from a player's scores in round order.
pub fn compute(scores_in_round_order: &[i32]) -> PlayerAggregates {
    let round_scores = scores_in_round_order.to_vec();
    let attempts = round_scores.len() as i32;
    let total_score: i32 = round_scores.iter().sum();
    let best_score = round_scores.iter().copied().max().unwrap_or(0);
    let session_score = if attempts > 0 {
        round2(f64::from(total_score) / f64::from(attempts))
    } else {
        0.0
    };

    PlayerAggregates {
        total_score,
        attempts,
        best_score,
        session_score,
        round_scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_yields_zeroes() {
        let agg = compute(&[]);
        assert_eq!(agg.attempts, 0);
        assert_eq!(agg.total_score, 0);
        assert_eq!(agg.best_score, 0);
        assert_eq!(agg.session_score, 0.0);
        assert!(agg.round_scores.is_empty());
    }

    #[test]
    fn session_score_is_mean_rounded_to_two_decimals() {
        let agg = compute(&[80, 60]);
        assert_eq!(agg.session_score, 70.0);

        let agg = compute(&[90, 70, 65]);
        // 225 / 3 = 75.0
        assert_eq!(agg.session_score, 75.0);

        let agg = compute(&[1, 1, 1]);
        // 1/1 = 1.0; now a non-terminating mean
        let agg2 = compute(&[1, 0, 0]);
        assert_eq!(agg.session_score, 1.0);
        assert_eq!(agg2.session_score, 0.33);
    }

    #[test]
    fn best_and_total_track_history() {
        let agg = compute(&[55, 91, 12]);
        assert_eq!(agg.total_score, 158);
        assert_eq!(agg.best_score, 91);
        assert_eq!(agg.attempts, 3);
        assert_eq!(agg.round_scores, vec![55, 91, 12]);
    }
}
