//! SeaORM adapter for the round repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::party_rounds;

pub mod dto;

pub use dto::RoundCreate;

/// Find a round by room code and round number
pub async fn find_by_room_and_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
    round_no: i32,
) -> Result<Option<party_rounds::Model>, sea_orm::DbErr> {
    party_rounds::Entity::find()
        .filter(party_rounds::Column::RoomCode.eq(room_code))
        .filter(party_rounds::Column::RoundNo.eq(round_no))
        .one(conn)
        .await
}

/// Find a round by ID
pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<party_rounds::Model>, sea_orm::DbErr> {
    party_rounds::Entity::find_by_id(round_id).one(conn).await
}

/// All rounds of a room, ordered by round number.
pub async fn find_all_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Vec<party_rounds::Model>, sea_orm::DbErr> {
    party_rounds::Entity::find()
        .filter(party_rounds::Column::RoomCode.eq(room_code))
        .order_by_asc(party_rounds::Column::RoundNo)
        .all(conn)
        .await
}

/// Create a new round, stamped with its start time.
///
/// The (room_code, round_no) unique key turns a lost startRound race into a
/// constraint violation instead of a duplicate round.
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<party_rounds::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let round = party_rounds::ActiveModel {
        id: NotSet,
        room_code: Set(dto.room_code),
        round_no: Set(dto.round_no),
        game_type: Set(dto.game_type),
        denner_id: Set(dto.denner_id),
        denner_name: Set(dto.denner_name),
        target_color: Set(dto.target_color),
        guess_time: Set(dto.guess_time),
        started_at: Set(now),
        ended_at: Set(None),
        is_completed: Set(false),
        player_results: Set(serde_json::json!([])),
        created_at: Set(now),
    };

    round.insert(conn).await
}

/// Mark a round as completed and attach its result summaries.
pub async fn complete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_results: serde_json::Value,
) -> Result<party_rounds::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let round = find_by_id(conn, round_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Round not found".to_string()))?;

    let mut round: party_rounds::ActiveModel = round.into();
    round.is_completed = Set(true);
    round.ended_at = Set(Some(now));
    round.player_results = Set(player_results);

    round.update(conn).await
}
