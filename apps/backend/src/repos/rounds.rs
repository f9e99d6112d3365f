//! Round repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::adapters::rounds_sea::RoundCreate;
use crate::entities::party_rooms::GameKind;
use crate::entities::party_rounds;
use crate::errors::domain::DomainError;

/// One player's summary attached to a completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub id: String,
    pub name: String,
    pub score: i32,
    pub attempts: i32,
}

/// Round domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub room_code: String,
    pub round_no: i32,
    pub game_type: GameKind,
    pub denner_id: String,
    pub denner_name: String,
    pub target_color: String,
    pub guess_time: i32,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
    pub is_completed: bool,
    pub player_results: Vec<RoundResult>,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_room_and_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    round_no: i32,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_room_and_no(conn, room_code, round_no).await?;
    Ok(round.map(Round::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(round.map(Round::from))
}

/// All rounds of a room, ordered by round number ascending.
pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_all_by_room(conn, room_code).await?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<Round, DomainError> {
    let round = rounds_adapter::create_round(conn, dto).await?;
    Ok(Round::from(round))
}

/// Mark a round completed (false -> true, not reversed by normal flow) and
/// attach its result summaries.
pub async fn complete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    results: &[RoundResult],
) -> Result<Round, DomainError> {
    let payload = serde_json::to_value(results)
        .map_err(|e| DomainError::infra(crate::errors::domain::InfraErrorKind::Other("Serde".into()), e.to_string()))?;
    let round = rounds_adapter::complete_round(conn, round_id, payload).await?;
    Ok(Round::from(round))
}

// Conversions between SeaORM models and domain models

impl From<party_rounds::Model> for Round {
    fn from(model: party_rounds::Model) -> Self {
        let player_results =
            serde_json::from_value::<Vec<RoundResult>>(model.player_results).unwrap_or_default();
        Self {
            id: model.id,
            room_code: model.room_code,
            round_no: model.round_no,
            game_type: model.game_type,
            denner_id: model.denner_id,
            denner_name: model.denner_name,
            target_color: model.target_color,
            guess_time: model.guess_time,
            started_at: model.started_at,
            ended_at: model.ended_at,
            is_completed: model.is_completed,
            player_results,
            created_at: model.created_at,
        }
    }
}
