//! Session leaderboard computation.
//!
//! Ranking is by average round score, not total, so a player who joined
//! late is not penalized for having played fewer rounds. Ties are broken by
//! total time taken ascending, then player id, so relative order is
//! deterministic everywhere the leaderboard is rendered.

use std::collections::HashMap;

use super::aggregates::round2;

/// Minimal score row fed into the computation, in round order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub player_id: String,
    pub player_name: String,
    pub score: i32,
    pub time_taken: f64,
}

/// One player's leaderboard line.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub player_name: String,
    /// Average used as the session score (2 decimals).
    pub session_score: f64,
    pub round_scores: Vec<i32>,
    /// Kept for reference; not the ranking key.
    pub total_score: i32,
    pub average_score: f64,
}

/// Group a room's scores by player and rank by average score descending.
///
/// `rows` must be in round order so `round_scores` reads chronologically.
pub fn compute(rows: &[ScoreRow]) -> Vec<LeaderboardEntry> {
    struct Acc {
        player_name: String,
        scores: Vec<i32>,
        time_total: f64,
    }

    let mut by_player: HashMap<&str, Acc> = HashMap::new();
    for row in rows {
        let acc = by_player.entry(&row.player_id).or_insert_with(|| Acc {
            player_name: row.player_name.clone(),
            scores: Vec::new(),
            time_total: 0.0,
        });
        acc.scores.push(row.score);
        acc.time_total += row.time_taken;
    }

    let mut entries: Vec<(LeaderboardEntry, f64)> = by_player
        .into_iter()
        .map(|(player_id, acc)| {
            let total_score: i32 = acc.scores.iter().sum();
            let average_score = if acc.scores.is_empty() {
                0.0
            } else {
                round2(f64::from(total_score) / acc.scores.len() as f64)
            };
            (
                LeaderboardEntry {
                    player_id: player_id.to_string(),
                    player_name: acc.player_name,
                    session_score: average_score,
                    round_scores: acc.scores,
                    total_score,
                    average_score,
                },
                acc.time_total,
            )
        })
        .collect();

    entries.sort_by(|(a, a_time), (b, b_time)| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a_time
                    .partial_cmp(b_time)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.player_id.cmp(&b.player_id))
    });

    entries.into_iter().map(|(entry, _)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, score: i32, time: f64) -> ScoreRow {
        ScoreRow {
            player_id: player.to_string(),
            player_name: player.to_uppercase(),
            score,
            time_taken: time,
        }
    }

    #[test]
    fn ranks_by_average_not_total() {
        // alice played 3 rounds totalling 210 (avg 70); bob played 2
        // totalling 165 (avg 82.5). Bob ranks first despite the lower total.
        let rows = vec![
            row("alice", 90, 5.0),
            row("bob", 70, 6.0),
            row("alice", 70, 5.0),
            row("bob", 95, 6.0),
            row("alice", 50, 5.0),
        ];
        let board = compute(&rows);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].player_id, "bob");
        assert_eq!(board[0].average_score, 82.5);
        assert_eq!(board[0].total_score, 165);
        assert_eq!(board[1].player_id, "alice");
        assert_eq!(board[1].average_score, 70.0);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let rows = vec![row("p", 80, 1.0), row("p", 60, 1.0)];
        let board = compute(&rows);
        assert_eq!(board[0].average_score, 70.0);
        assert_eq!(board[0].session_score, 70.0);

        let rows = vec![row("p", 1, 1.0), row("p", 0, 1.0), row("p", 0, 1.0)];
        let board = compute(&rows);
        assert_eq!(board[0].average_score, 0.33);
    }

    #[test]
    fn ties_break_on_time_then_player_id() {
        let rows = vec![
            row("slow", 80, 20.0),
            row("fast", 80, 4.0),
            row("also-fast", 80, 4.0),
        ];
        let board = compute(&rows);
        assert_eq!(board[0].player_id, "also-fast");
        assert_eq!(board[1].player_id, "fast");
        assert_eq!(board[2].player_id, "slow");
    }

    #[test]
    fn round_scores_preserve_round_order() {
        let rows = vec![row("p", 10, 1.0), row("p", 30, 1.0), row("p", 20, 1.0)];
        let board = compute(&rows);
        assert_eq!(board[0].round_scores, vec![10, 30, 20]);
    }
}
