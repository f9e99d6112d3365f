//! SeaORM adapter for the score repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::party_scores;

pub mod dto;

pub use dto::ScoreSave;

/// Idempotent score upsert keyed on (round_id, player_id).
///
/// A resubmission overwrites score, time, captured color, similarity and the
/// submission timestamp; the unique key guarantees concurrent submits
/// converge on one row with last-write-wins values.
pub async fn save_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScoreSave,
) -> Result<party_scores::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let score = party_scores::ActiveModel {
        id: NotSet,
        room_code: Set(dto.room_code),
        round_id: Set(dto.round_id),
        player_id: Set(dto.player_id.clone()),
        player_name: Set(dto.player_name),
        score: Set(dto.score),
        time_taken: Set(dto.time_taken),
        target_color: Set(dto.target_color),
        captured_color: Set(dto.captured_color),
        similarity: Set(dto.similarity),
        game_type: Set(dto.game_type),
        submitted_at: Set(now),
    };

    let round_id = dto.round_id;
    party_scores::Entity::insert(score)
        .on_conflict(
            OnConflict::columns([
                party_scores::Column::RoundId,
                party_scores::Column::PlayerId,
            ])
            .update_columns([
                party_scores::Column::Score,
                party_scores::Column::TimeTaken,
                party_scores::Column::CapturedColor,
                party_scores::Column::Similarity,
                party_scores::Column::SubmittedAt,
            ])
            .to_owned(),
        )
        .exec(conn)
        .await?;

    find_by_round_and_player(conn, round_id, &dto.player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Score not found after upsert".to_string()))
}

pub async fn find_by_round_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: &str,
) -> Result<Option<party_scores::Model>, sea_orm::DbErr> {
    party_scores::Entity::find()
        .filter(party_scores::Column::RoundId.eq(round_id))
        .filter(party_scores::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

/// All scores for one round, best first (score desc, then time asc).
pub async fn find_all_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<party_scores::Model>, sea_orm::DbErr> {
    party_scores::Entity::find()
        .filter(party_scores::Column::RoundId.eq(round_id))
        .order_by(party_scores::Column::Score, Order::Desc)
        .order_by(party_scores::Column::TimeTaken, Order::Asc)
        .all(conn)
        .await
}

/// All scores for a room in round order; the raw input of aggregate and
/// leaderboard computation.
pub async fn find_all_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_code: &str,
) -> Result<Vec<party_scores::Model>, sea_orm::DbErr> {
    party_scores::Entity::find()
        .filter(party_scores::Column::RoomCode.eq(room_code))
        .order_by_asc(party_scores::Column::RoundId)
        .order_by_asc(party_scores::Column::Id)
        .all(conn)
        .await
}
