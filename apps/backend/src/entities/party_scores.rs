use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::party_rooms::GameKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "party_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "room_code")]
    pub room_code: String,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: String,
    #[sea_orm(column_name = "player_name")]
    pub player_name: String,
    pub score: i32,
    /// Seconds with fractional part.
    #[sea_orm(column_name = "time_taken")]
    pub time_taken: f64,
    #[sea_orm(column_name = "target_color")]
    pub target_color: String,
    #[sea_orm(column_name = "captured_color")]
    pub captured_color: Option<String>,
    /// Color similarity in percent (0-100), when the client reports one.
    pub similarity: Option<f64>,
    #[sea_orm(column_name = "game_type")]
    pub game_type: GameKind,
    #[sea_orm(column_name = "submitted_at")]
    pub submitted_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::party_rounds::Entity",
        from = "Column::RoundId",
        to = "super::party_rounds::Column::Id"
    )]
    PartyRounds,
}

impl Related<super::party_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyRounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
