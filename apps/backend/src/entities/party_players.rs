use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "party_players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "room_code")]
    pub room_code: String,
    #[sea_orm(column_name = "player_id")]
    pub player_id: String,
    #[sea_orm(column_name = "player_name")]
    pub player_name: String,
    /// Cumulative score across the session (sum of round scores).
    pub score: i32,
    pub attempts: i32,
    #[sea_orm(column_name = "best_score")]
    pub best_score: i32,
    /// Mean round score, rounded to 2 decimal places.
    #[sea_orm(column_name = "session_score")]
    pub session_score: f64,
    /// Per-round scores in round order, as a JSON array.
    #[sea_orm(column_name = "round_scores", column_type = "Json")]
    pub round_scores: Json,
    #[sea_orm(column_name = "joined_at")]
    pub joined_at: OffsetDateTime,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "last_seen")]
    pub last_seen: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::party_rooms::Entity",
        from = "Column::RoomCode",
        to = "super::party_rooms::Column::RoomCode"
    )]
    PartyRooms,
}

impl Related<super::party_rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyRooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
