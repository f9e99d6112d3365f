//! Score repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::scores_sea as scores_adapter;
use crate::adapters::scores_sea::ScoreSave;
use crate::entities::party_rooms::GameKind;
use crate::entities::party_scores;
use crate::errors::domain::DomainError;

/// Score domain model - one player's submitted result for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub id: i64,
    pub room_code: String,
    pub round_id: i64,
    pub player_id: String,
    pub player_name: String,
    pub score: i32,
    pub time_taken: f64,
    pub target_color: String,
    pub captured_color: Option<String>,
    pub similarity: Option<f64>,
    pub game_type: GameKind,
    pub submitted_at: OffsetDateTime,
}

/// Idempotent upsert keyed on (round_id, player_id); latest submission wins.
pub async fn save_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScoreSave,
) -> Result<Score, DomainError> {
    let score = scores_adapter::save_score(conn, dto).await?;
    Ok(Score::from(score))
}

pub async fn find_by_round_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: &str,
) -> Result<Option<Score>, DomainError> {
    let score = scores_adapter::find_by_round_and_player(conn, round_id, player_id).await?;
    Ok(score.map(Score::from))
}

/// All scores for one round, best first.
pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Score>, DomainError> {
    let scores = scores_adapter::find_all_by_round(conn, round_id).await?;
    Ok(scores.into_iter().map(Score::from).collect())
}

/// All scores for a room in round order - the raw input of aggregate and
/// leaderboard computation.
pub async fn list_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Vec<Score>, DomainError> {
    let scores = scores_adapter::find_all_by_room(conn, room_code).await?;
    Ok(scores.into_iter().map(Score::from).collect())
}

// Conversions between SeaORM models and domain models

impl From<party_scores::Model> for Score {
    fn from(model: party_scores::Model) -> Self {
        Self {
            id: model.id,
            room_code: model.room_code,
            round_id: model.round_id,
            player_id: model.player_id,
            player_name: model.player_name,
            score: model.score,
            time_taken: model.time_taken,
            target_color: model.target_color,
            captured_color: model.captured_color,
            similarity: model.similarity,
            game_type: model.game_type,
            submitted_at: model.submitted_at,
        }
    }
}
