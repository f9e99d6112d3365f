//! SeaORM adapter for the room repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    Set,
};
use time::OffsetDateTime;

use crate::entities::party_rooms;

pub mod dto;

pub use dto::{RoomCreate, RoomUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// Helper: apply an optimistic update with lock version check, then refetch.
///
/// Adds the lock_version increment and updated_at refresh to the update,
/// filters by room_code and the expected lock_version, distinguishes
/// NotFound from OptimisticLock on zero rows affected, and returns the
/// refetched model.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    room_code: &str,
    expected_version: i32,
    configure_update: F,
) -> Result<party_rooms::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<party_rooms::Entity>) -> sea_orm::UpdateMany<party_rooms::Entity>,
{
    let now = OffsetDateTime::now_utc();

    let result = configure_update(party_rooms::Entity::update_many())
        .col_expr(party_rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            party_rooms::Column::LockVersion,
            Expr::col(party_rooms::Column::LockVersion).add(1),
        )
        .filter(party_rooms::Column::RoomCode.eq(room_code))
        .filter(party_rooms::Column::LockVersion.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Either the room doesn't exist or the lock version doesn't match
        let room = find_by_code_any(conn, room_code).await?;
        if let Some(room) = room {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected_version, room.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        }
        return Err(sea_orm::DbErr::RecordNotFound("Room not found".to_string()));
    }

    find_by_code_any(conn, room_code)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Room not found".to_string()))
}

/// Find an active room by its code. Inactive rooms read as nonexistent.
pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Option<party_rooms::Model>, sea_orm::DbErr> {
    party_rooms::Entity::find()
        .filter(party_rooms::Column::RoomCode.eq(room_code))
        .filter(party_rooms::Column::IsActive.eq(true))
        .one(conn)
        .await
}

/// Find a room regardless of its active flag (refetch after deactivation).
pub async fn find_by_code_any<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Option<party_rooms::Model>, sea_orm::DbErr> {
    party_rooms::Entity::find()
        .filter(party_rooms::Column::RoomCode.eq(room_code))
        .one(conn)
        .await
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<party_rooms::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let rotation = serde_json::json!([dto.host_id]);

    let room = party_rooms::ActiveModel {
        id: NotSet,
        room_code: Set(dto.room_code),
        host_id: Set(dto.host_id),
        host_name: Set(dto.host_name),
        max_players: Set(dto.max_players),
        max_rounds: Set(dto.max_rounds),
        guess_time: Set(dto.guess_time),
        current_round: Set(0),
        state: Set(party_rooms::RoomState::Lobby),
        game_type: Set(None),
        target_color: Set(dto.target_color),
        current_guess_time: Set(dto.guess_time),
        started_at: Set(None),
        ended_at: Set(None),
        is_active: Set(true),
        denner_rotation: Set(rotation),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    room.insert(conn).await
}

/// Apply a partial room update with optimistic locking.
pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdate,
) -> Result<party_rooms::Model, sea_orm::DbErr> {
    let room_code = dto.room_code.clone();
    optimistic_update_then_fetch(conn, &room_code, dto.expected_version, |mut update| {
        if let Some(state) = dto.state {
            update = update.col_expr(party_rooms::Column::State, Expr::val(state.to_value()).into());
        }
        if let Some(game_type) = dto.game_type {
            update = update.col_expr(
                party_rooms::Column::GameType,
                Expr::val(game_type.to_value()).into(),
            );
        }
        if let Some(color) = dto.target_color {
            update = update.col_expr(party_rooms::Column::TargetColor, Expr::val(color).into());
        }
        if let Some(round_no) = dto.current_round {
            update = update.col_expr(party_rooms::Column::CurrentRound, Expr::val(round_no).into());
        }
        if let Some(seconds) = dto.current_guess_time {
            update = update.col_expr(
                party_rooms::Column::CurrentGuessTime,
                Expr::val(seconds).into(),
            );
        }
        if let Some(at) = dto.started_at {
            update = update.col_expr(party_rooms::Column::StartedAt, Expr::val(at).into());
        }
        if let Some(at) = dto.ended_at {
            update = update.col_expr(party_rooms::Column::EndedAt, Expr::val(at).into());
        }
        if let Some(host_id) = dto.host_id {
            update = update.col_expr(party_rooms::Column::HostId, Expr::val(host_id).into());
        }
        if let Some(host_name) = dto.host_name {
            update = update.col_expr(party_rooms::Column::HostName, Expr::val(host_name).into());
        }
        if let Some(rotation) = dto.denner_rotation {
            let value = serde_json::json!(rotation);
            update = update.col_expr(party_rooms::Column::DennerRotation, Expr::val(value).into());
        }
        update
    })
    .await
}

/// Soft-delete a room: clear the active flag and stamp ended_at. Idempotent -
/// deactivating an already-inactive or missing room affects zero rows.
pub async fn deactivate_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<(), sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    party_rooms::Entity::update_many()
        .col_expr(party_rooms::Column::IsActive, Expr::val(false).into())
        .col_expr(party_rooms::Column::EndedAt, Expr::val(now).into())
        .col_expr(party_rooms::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            party_rooms::Column::LockVersion,
            Expr::col(party_rooms::Column::LockVersion).add(1),
        )
        .filter(party_rooms::Column::RoomCode.eq(room_code))
        .filter(party_rooms::Column::IsActive.eq(true))
        .exec(conn)
        .await?;
    Ok(())
}

/// Deactivate all active rooms untouched since `cutoff`. Returns how many
/// rooms were swept.
pub async fn deactivate_stale_rooms<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = party_rooms::Entity::update_many()
        .col_expr(party_rooms::Column::IsActive, Expr::val(false).into())
        .col_expr(
            party_rooms::Column::LockVersion,
            Expr::col(party_rooms::Column::LockVersion).add(1),
        )
        .filter(party_rooms::Column::IsActive.eq(true))
        .filter(party_rooms::Column::UpdatedAt.lt(cutoff))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
