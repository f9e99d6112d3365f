//! Player repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::players_sea as players_adapter;
use crate::adapters::players_sea::{PlayerAggregatesUpdate, PlayerUpdate, PlayerUpsert};
use crate::entities::party_players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub room_code: String,
    pub player_id: String,
    pub player_name: String,
    pub score: i32,
    pub attempts: i32,
    pub best_score: i32,
    pub session_score: f64,
    pub round_scores: Vec<i32>,
    pub joined_at: OffsetDateTime,
    pub is_active: bool,
    pub last_seen: OffsetDateTime,
}

/// Insert or reactivate a player in a room. Re-adding an already-present
/// player refreshes is_active/last_seen instead of duplicating the row.
pub async fn upsert_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
    player_name: &str,
) -> Result<Player, DomainError> {
    let dto = PlayerUpsert {
        room_code: room_code.to_string(),
        player_id: player_id.to_string(),
        player_name: player_name.to_string(),
    };
    let player = players_adapter::upsert_player(conn, dto).await?;
    Ok(Player::from(player))
}

/// Active players ordered by join time ascending.
pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::find_active_by_room(conn, room_code).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

/// Find a player's row in a room, active or not.
pub async fn find_by_room_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_room_and_player(conn, room_code, player_id).await?;
    Ok(player.map(Player::from))
}

pub async fn count_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<u64, DomainError> {
    let count = players_adapter::count_active(conn, room_code).await?;
    Ok(count)
}

/// Caller-driven update (rename/heartbeat); always refreshes last_seen.
pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
    dto: PlayerUpdate,
) -> Result<Player, DomainError> {
    match players_adapter::update_player(conn, room_code, player_id, dto).await {
        Ok(player) => Ok(Player::from(player)),
        Err(sea_orm::DbErr::RecordNotFound(_)) => Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found in room {room_code}"),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Persist recomputed aggregates onto the player row so reads stay O(1).
pub async fn update_aggregates<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
    dto: PlayerAggregatesUpdate,
) -> Result<Player, DomainError> {
    match players_adapter::update_aggregates(conn, room_code, player_id, dto).await {
        Ok(player) => Ok(Player::from(player)),
        Err(sea_orm::DbErr::RecordNotFound(_)) => Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found in room {room_code}"),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Soft-remove a player; score history is kept.
pub async fn remove_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
) -> Result<(), DomainError> {
    players_adapter::deactivate_player(conn, room_code, player_id).await?;
    Ok(())
}

/// Sweep players unseen since `cutoff`; returns the number deactivated.
pub async fn deactivate_stale<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, DomainError> {
    let swept = players_adapter::deactivate_stale_players(conn, cutoff).await?;
    Ok(swept)
}

// Conversions between SeaORM models and domain models

impl From<party_players::Model> for Player {
    fn from(model: party_players::Model) -> Self {
        let round_scores =
            serde_json::from_value::<Vec<i32>>(model.round_scores).unwrap_or_default();
        Self {
            id: model.id,
            room_code: model.room_code,
            player_id: model.player_id,
            player_name: model.player_name,
            score: model.score,
            attempts: model.attempts,
            best_score: model.best_score,
            session_score: model.session_score,
            round_scores,
            joined_at: model.joined_at,
            is_active: model.is_active,
            last_seen: model.last_seen,
        }
    }
}
