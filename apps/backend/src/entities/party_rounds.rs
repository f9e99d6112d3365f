use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::party_rooms::GameKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "party_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "room_code")]
    pub room_code: String,
    /// 1-based round number, unique per room.
    #[sea_orm(column_name = "round_no")]
    pub round_no: i32,
    #[sea_orm(column_name = "game_type")]
    pub game_type: GameKind,
    #[sea_orm(column_name = "denner_id")]
    pub denner_id: String,
    #[sea_orm(column_name = "denner_name")]
    pub denner_name: String,
    #[sea_orm(column_name = "target_color")]
    pub target_color: String,
    #[sea_orm(column_name = "guess_time")]
    pub guess_time: i32,
    #[sea_orm(column_name = "started_at")]
    pub started_at: OffsetDateTime,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "is_completed")]
    pub is_completed: bool,
    /// Result summaries attached at completion: JSON array of
    /// {id, name, score, attempts}.
    #[sea_orm(column_name = "player_results", column_type = "Json")]
    pub player_results: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::party_rooms::Entity",
        from = "Column::RoomCode",
        to = "super::party_rooms::Column::RoomCode"
    )]
    PartyRooms,
    #[sea_orm(has_many = "super::party_scores::Entity")]
    PartyScores,
}

impl Related<super::party_rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyRooms.def()
    }
}

impl Related<super::party_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
