use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Coarse session state of a party room.
///
/// Stored as a short varchar so the same schema runs on Postgres and SQLite;
/// the string values match what the browser clients poll for.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RoomState {
    #[sea_orm(string_value = "lobby")]
    #[serde(rename = "lobby")]
    Lobby,
    #[sea_orm(string_value = "gameSelection")]
    #[serde(rename = "gameSelection")]
    GameSelection,
    #[sea_orm(string_value = "playing")]
    #[serde(rename = "playing")]
    Playing,
    #[sea_orm(string_value = "roundFinished")]
    #[serde(rename = "roundFinished")]
    RoundFinished,
    #[sea_orm(string_value = "sessionFinished")]
    #[serde(rename = "sessionFinished")]
    SessionFinished,
}

/// Which color challenge a round plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum GameKind {
    #[sea_orm(string_value = "findColor")]
    #[serde(rename = "findColor")]
    FindColor,
    #[sea_orm(string_value = "colorMixing")]
    #[serde(rename = "colorMixing")]
    ColorMixing,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "party_rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "room_code")]
    pub room_code: String,
    #[sea_orm(column_name = "host_id")]
    pub host_id: String,
    #[sea_orm(column_name = "host_name")]
    pub host_name: String,
    #[sea_orm(column_name = "max_players")]
    pub max_players: i32,
    #[sea_orm(column_name = "max_rounds")]
    pub max_rounds: i32,
    #[sea_orm(column_name = "guess_time")]
    pub guess_time: i32,
    #[sea_orm(column_name = "current_round")]
    pub current_round: i32,
    pub state: RoomState,
    #[sea_orm(column_name = "game_type")]
    pub game_type: Option<GameKind>,
    #[sea_orm(column_name = "target_color")]
    pub target_color: Option<String>,
    #[sea_orm(column_name = "current_guess_time")]
    pub current_guess_time: i32,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    /// Host-rotation order as a JSON array of player ids.
    #[sea_orm(column_name = "denner_rotation", column_type = "Json")]
    pub denner_rotation: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::party_players::Entity")]
    PartyPlayers,
    #[sea_orm(has_many = "super::party_rounds::Entity")]
    PartyRounds,
}

impl Related<super::party_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyPlayers.def()
    }
}

impl Related<super::party_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyRounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
