//! Room repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::rooms_sea as rooms_adapter;
use crate::adapters::rooms_sea::{RoomCreate, RoomUpdate};
use crate::entities::party_rooms;
use crate::entities::party_rooms::{GameKind, RoomState};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Room domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub room_code: String,
    pub host_id: String,
    pub host_name: String,
    pub max_players: i32,
    pub max_rounds: i32,
    pub guess_time: i32,
    pub current_round: i32,
    pub state: RoomState,
    pub game_type: Option<GameKind>,
    pub target_color: Option<String>,
    pub current_guess_time: i32,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub is_active: bool,
    pub denner_rotation: Vec<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub lock_version: i32,
}

/// Find an active room by its shareable code.
pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Option<Room>, DomainError> {
    let room = rooms_adapter::find_by_code(conn, room_code).await?;
    Ok(room.map(Room::from))
}

/// Find an active room or fail with a Room not-found.
pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Room, DomainError> {
    find_by_code(conn, room_code)
        .await?
        .ok_or_else(|| DomainError::room_not_found(room_code))
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<Room, DomainError> {
    let room = rooms_adapter::create_room(conn, dto).await?;
    Ok(Room::from(room))
}

/// Apply a partial update with optimistic locking; refreshes updated_at.
pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdate,
) -> Result<Room, DomainError> {
    let room_code = dto.room_code.clone();
    match rooms_adapter::update_room(conn, dto).await {
        Ok(room) => Ok(Room::from(room)),
        Err(sea_orm::DbErr::RecordNotFound(_)) => Err(DomainError::not_found(
            NotFoundKind::Room,
            format!("Room {room_code} not found"),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Soft-delete a room; idempotent.
pub async fn deactivate_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<(), DomainError> {
    rooms_adapter::deactivate_room(conn, room_code).await?;
    Ok(())
}

/// Sweep rooms untouched since `cutoff`; returns the number deactivated.
pub async fn deactivate_stale<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, DomainError> {
    let swept = rooms_adapter::deactivate_stale_rooms(conn, cutoff).await?;
    Ok(swept)
}

// Conversions between SeaORM models and domain models

impl From<party_rooms::Model> for Room {
    fn from(model: party_rooms::Model) -> Self {
        let denner_rotation =
            serde_json::from_value::<Vec<String>>(model.denner_rotation).unwrap_or_default();
        Self {
            id: model.id,
            room_code: model.room_code,
            host_id: model.host_id,
            host_name: model.host_name,
            max_players: model.max_players,
            max_rounds: model.max_rounds,
            guess_time: model.guess_time,
            current_round: model.current_round,
            state: model.state,
            game_type: model.game_type,
            target_color: model.target_color,
            current_guess_time: model.current_guess_time,
            started_at: model.started_at,
            ended_at: model.ended_at,
            is_active: model.is_active,
            denner_rotation,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        }
    }
}
