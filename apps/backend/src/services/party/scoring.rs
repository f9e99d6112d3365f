use sea_orm::DatabaseTransaction;
use tracing::info;

use super::{GameInfo, PartyService};
use crate::adapters::players_sea::PlayerAggregatesUpdate;
use crate::adapters::scores_sea::ScoreSave;
use crate::domain::leaderboard::ScoreRow;
use crate::domain::{compute_aggregates, compute_leaderboard, LeaderboardEntry};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::scores::Score;
use crate::repos::{players, rooms, rounds, scores};

/// One score submission for the room's current round.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    pub player_id: String,
    pub player_name: String,
    pub score: i32,
    pub time_taken: f64,
    pub captured_color: Option<String>,
    pub similarity: Option<f64>,
}

impl PartyService {
    /// Record a score for the room's current round.
    ///
    /// The write is an idempotent upsert - resubmitting replaces the earlier
    /// attempt. Afterwards the player's aggregates are recomputed from the
    /// full persisted history inside the same transaction, so they cannot
    /// drift from the raw scores under concurrent writers.
    pub async fn submit_score(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        submission: SubmitScore,
    ) -> Result<GameInfo, AppError> {
        if submission.player_id.is_empty() || submission.player_name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingField,
                "Player id and name are required",
            )
            .into());
        }
        if submission.time_taken < 0.0 {
            return Err(DomainError::validation(
                ValidationKind::Other("TIME_TAKEN".into()),
                "Time taken cannot be negative",
            )
            .into());
        }
        if let Some(similarity) = submission.similarity {
            if !(0.0..=100.0).contains(&similarity) {
                return Err(DomainError::validation(
                    ValidationKind::Other("SIMILARITY".into()),
                    "Similarity must be between 0 and 100",
                )
                .into());
            }
        }

        let room = rooms::require_room(txn, room_code).await?;
        let round = rounds::find_by_room_and_no(txn, room_code, room.current_round)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Round,
                    format!(
                        "Round {} not found in room {room_code}",
                        room.current_round
                    ),
                )
            })?;

        scores::save_score(
            txn,
            ScoreSave {
                room_code: room_code.to_string(),
                round_id: round.id,
                player_id: submission.player_id.clone(),
                player_name: submission.player_name.clone(),
                score: submission.score,
                time_taken: submission.time_taken,
                target_color: round.target_color.clone(),
                captured_color: submission.captured_color,
                similarity: submission.similarity,
                game_type: round.game_type,
            },
        )
        .await?;

        // Re-read the full history and derive the aggregates from it.
        let history = scores::list_by_room(txn, room_code).await?;
        let player_history: Vec<i32> = history
            .iter()
            .filter(|s| s.player_id == submission.player_id)
            .map(|s| s.score)
            .collect();
        let aggregates = compute_aggregates(&player_history);

        players::update_aggregates(
            txn,
            room_code,
            &submission.player_id,
            PlayerAggregatesUpdate {
                total_score: aggregates.total_score,
                attempts: aggregates.attempts,
                best_score: aggregates.best_score,
                session_score: aggregates.session_score,
                round_scores: aggregates.round_scores,
            },
        )
        .await?;

        info!(
            room_code,
            player_id = %submission.player_id,
            round = room.current_round,
            score = submission.score,
            "score submitted"
        );

        self.game_info(txn, room_code).await
    }

    /// Raw scores of a room (optionally one round), best first.
    pub async fn list_scores(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        round_no: Option<i32>,
    ) -> Result<Vec<Score>, AppError> {
        rooms::require_room(txn, room_code).await?;

        match round_no {
            Some(no) => {
                let round = rounds::find_by_room_and_no(txn, room_code, no)
                    .await?
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Round,
                            format!("Round {no} not found in room {room_code}"),
                        )
                    })?;
                Ok(scores::list_by_round(txn, round.id).await?)
            }
            None => {
                let mut all = scores::list_by_room(txn, room_code).await?;
                all.sort_by(|a, b| {
                    b.score.cmp(&a.score).then(
                        a.time_taken
                            .partial_cmp(&b.time_taken)
                            .unwrap_or(std::cmp::Ordering::Equal),
                    )
                });
                Ok(all)
            }
        }
    }

    /// Session leaderboard: grouped by player, ranked by average score.
    pub async fn leaderboard(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        rooms::require_room(txn, room_code).await?;

        let history = scores::list_by_room(txn, room_code).await?;
        let rows: Vec<ScoreRow> = history
            .into_iter()
            .map(|s| ScoreRow {
                player_id: s.player_id,
                player_name: s.player_name,
                score: s.score,
                time_taken: s.time_taken,
            })
            .collect();

        Ok(compute_leaderboard(&rows))
    }
}
