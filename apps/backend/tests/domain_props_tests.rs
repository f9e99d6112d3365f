//! Property tests for the pure aggregation and ranking logic.

use backend::domain::compute_aggregates;
use backend::domain::leaderboard::{compute as compute_leaderboard, ScoreRow};
use proptest::prelude::*;

proptest! {
    #[test]
    fn aggregates_are_consistent_with_history(scores in proptest::collection::vec(0i32..=100, 0..40)) {
        let agg = compute_aggregates(&scores);

        prop_assert_eq!(agg.attempts as usize, scores.len());
        prop_assert_eq!(agg.total_score, scores.iter().sum::<i32>());
        prop_assert_eq!(agg.best_score, scores.iter().copied().max().unwrap_or(0));
        prop_assert_eq!(agg.round_scores.clone(), scores.clone());

        if scores.is_empty() {
            prop_assert_eq!(agg.session_score, 0.0);
        } else {
            let mean = f64::from(agg.total_score) / scores.len() as f64;
            prop_assert!((agg.session_score - mean).abs() <= 0.005);
        }
    }

    #[test]
    fn leaderboard_is_sorted_and_complete(
        rows in proptest::collection::vec(
            (0usize..6, 0i32..=100, 0u32..1000),
            0..60,
        )
    ) {
        let rows: Vec<ScoreRow> = rows
            .into_iter()
            .map(|(player, score, time)| ScoreRow {
                player_id: format!("p{player}"),
                player_name: format!("P{player}"),
                score,
                time_taken: f64::from(time) / 10.0,
            })
            .collect();

        let board = compute_leaderboard(&rows);

        // Sorted by average, non-increasing
        for pair in board.windows(2) {
            prop_assert!(pair[0].average_score >= pair[1].average_score);
        }

        // Every input row lands in exactly one entry
        let total_rows: usize = board.iter().map(|e| e.round_scores.len()).sum();
        prop_assert_eq!(total_rows, rows.len());

        // Entry-level invariants
        for entry in &board {
            prop_assert_eq!(entry.total_score, entry.round_scores.iter().sum::<i32>());
            let mean = f64::from(entry.total_score) / entry.round_scores.len() as f64;
            prop_assert!((entry.average_score - mean).abs() <= 0.005);
            prop_assert_eq!(entry.session_score, entry.average_score);
        }
    }
}
