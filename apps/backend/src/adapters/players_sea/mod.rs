//! SeaORM adapter for the player repository - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::party_players;

pub mod dto;

pub use dto::{PlayerAggregatesUpdate, PlayerUpdate, PlayerUpsert};

/// Insert a player, or reactivate the existing (room_code, player_id) row.
///
/// The unique key makes concurrent joins for the same player converge on a
/// single row; a rejoin refreshes is_active and last_seen and leaves score
/// history untouched.
pub async fn upsert_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpsert,
) -> Result<party_players::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let player = party_players::ActiveModel {
        id: NotSet,
        room_code: Set(dto.room_code.clone()),
        player_id: Set(dto.player_id.clone()),
        player_name: Set(dto.player_name),
        score: Set(0),
        attempts: Set(0),
        best_score: Set(0),
        session_score: Set(0.0),
        round_scores: Set(serde_json::json!([])),
        joined_at: Set(now),
        is_active: Set(true),
        last_seen: Set(now),
    };

    party_players::Entity::insert(player)
        .on_conflict(
            OnConflict::columns([
                party_players::Column::RoomCode,
                party_players::Column::PlayerId,
            ])
            .update_columns([
                party_players::Column::IsActive,
                party_players::Column::LastSeen,
            ])
            .to_owned(),
        )
        .exec(conn)
        .await?;

    find_by_room_and_player(conn, &dto.room_code, &dto.player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Player not found after upsert".to_string()))
}

/// Active players of a room, earliest joined first.
pub async fn find_active_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Vec<party_players::Model>, sea_orm::DbErr> {
    party_players::Entity::find()
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::IsActive.eq(true))
        .order_by_asc(party_players::Column::JoinedAt)
        .order_by_asc(party_players::Column::Id)
        .all(conn)
        .await
}

/// Find a player's row in a room, active or not.
pub async fn find_by_room_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
) -> Result<Option<party_players::Model>, sea_orm::DbErr> {
    party_players::Entity::find()
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

pub async fn count_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<u64, sea_orm::DbErr> {
    party_players::Entity::find()
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::IsActive.eq(true))
        .count(conn)
        .await
}

/// Apply a caller-driven update (rename) and refresh last_seen.
pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
    dto: PlayerUpdate,
) -> Result<party_players::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let mut update = party_players::Entity::update_many()
        .col_expr(party_players::Column::LastSeen, Expr::val(now).into());
    if let Some(name) = dto.player_name {
        update = update.col_expr(party_players::Column::PlayerName, Expr::val(name).into());
    }

    let result = update
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::PlayerId.eq(player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "Player not found".to_string(),
        ));
    }

    find_by_room_and_player(conn, room_code, player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Player not found".to_string()))
}

/// Persist recomputed aggregates onto the player row.
pub async fn update_aggregates<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
    dto: PlayerAggregatesUpdate,
) -> Result<party_players::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let round_scores = serde_json::json!(dto.round_scores);

    let result = party_players::Entity::update_many()
        .col_expr(party_players::Column::Score, Expr::val(dto.total_score).into())
        .col_expr(party_players::Column::Attempts, Expr::val(dto.attempts).into())
        .col_expr(
            party_players::Column::BestScore,
            Expr::val(dto.best_score).into(),
        )
        .col_expr(
            party_players::Column::SessionScore,
            Expr::val(dto.session_score).into(),
        )
        .col_expr(
            party_players::Column::RoundScores,
            Expr::val(round_scores).into(),
        )
        .col_expr(party_players::Column::LastSeen, Expr::val(now).into())
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::PlayerId.eq(player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "Player not found".to_string(),
        ));
    }

    find_by_room_and_player(conn, room_code, player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Player not found".to_string()))
}

/// Soft-remove a player from a room. Score history is kept.
pub async fn deactivate_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    player_id: &str,
) -> Result<(), sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    party_players::Entity::update_many()
        .col_expr(party_players::Column::IsActive, Expr::val(false).into())
        .col_expr(party_players::Column::LastSeen, Expr::val(now).into())
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::PlayerId.eq(player_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Deactivate all active players unseen since `cutoff`. Returns how many
/// players were swept.
pub async fn deactivate_stale_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = party_players::Entity::update_many()
        .col_expr(party_players::Column::IsActive, Expr::val(false).into())
        .filter(party_players::Column::IsActive.eq(true))
        .filter(party_players::Column::LastSeen.lt(cutoff))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
