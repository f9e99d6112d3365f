use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----

#[derive(Iden)]
enum PartyRooms {
    Table,
    Id,
    RoomCode,
    HostId,
    HostName,
    MaxPlayers,
    MaxRounds,
    GuessTime,
    CurrentRound,
    State,
    GameType,
    TargetColor,
    CurrentGuessTime,
    StartedAt,
    EndedAt,
    IsActive,
    DennerRotation,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum PartyPlayers {
    Table,
    Id,
    RoomCode,
    PlayerId,
    PlayerName,
    Score,
    Attempts,
    BestScore,
    SessionScore,
    RoundScores,
    JoinedAt,
    IsActive,
    LastSeen,
}

#[derive(Iden)]
enum PartyRounds {
    Table,
    Id,
    RoomCode,
    RoundNo,
    GameType,
    DennerId,
    DennerName,
    TargetColor,
    GuessTime,
    StartedAt,
    EndedAt,
    IsCompleted,
    PlayerResults,
    CreatedAt,
}

#[derive(Iden)]
enum PartyScores {
    Table,
    Id,
    RoomCode,
    RoundId,
    PlayerId,
    PlayerName,
    Score,
    TimeTaken,
    TargetColor,
    CapturedColor,
    Similarity,
    GameType,
    SubmittedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Room / player / round state enums are stored as short varchars so the
        // same migration runs on Postgres and SQLite.
        manager
            .create_table(
                Table::create()
                    .table(PartyRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartyRooms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::RoomCode)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PartyRooms::HostId).string_len(50).not_null())
                    .col(
                        ColumnDef::new(PartyRooms::HostName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::MaxPlayers)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::MaxRounds)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::GuessTime)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::CurrentRound)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::State)
                            .string_len(20)
                            .not_null()
                            .default("lobby"),
                    )
                    .col(ColumnDef::new(PartyRooms::GameType).string_len(20))
                    .col(ColumnDef::new(PartyRooms::TargetColor).string_len(50))
                    .col(
                        ColumnDef::new(PartyRooms::CurrentGuessTime)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(ColumnDef::new(PartyRooms::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(PartyRooms::EndedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(PartyRooms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(PartyRooms::DennerRotation).json().not_null())
                    .col(
                        ColumnDef::new(PartyRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyRooms::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_rooms_active_idx")
                    .table(PartyRooms::Table)
                    .col(PartyRooms::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_rooms_updated_idx")
                    .table(PartyRooms::Table)
                    .col(PartyRooms::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartyPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartyPlayers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::RoomCode)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::PlayerId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::PlayerName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::Attempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::BestScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::SessionScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(PartyPlayers::RoundScores).json().not_null())
                    .col(
                        ColumnDef::new(PartyPlayers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PartyPlayers::LastSeen)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_players_room_player_unique")
                    .table(PartyPlayers::Table)
                    .col(PartyPlayers::RoomCode)
                    .col(PartyPlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_players_room_idx")
                    .table(PartyPlayers::Table)
                    .col(PartyPlayers::RoomCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_players_last_seen_idx")
                    .table(PartyPlayers::Table)
                    .col(PartyPlayers::LastSeen)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartyRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartyRounds::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartyRounds::RoomCode)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyRounds::RoundNo).integer().not_null())
                    .col(
                        ColumnDef::new(PartyRounds::GameType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyRounds::DennerId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyRounds::DennerName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyRounds::TargetColor)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyRounds::GuessTime).integer().not_null())
                    .col(
                        ColumnDef::new(PartyRounds::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyRounds::EndedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(PartyRounds::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PartyRounds::PlayerResults).json().not_null())
                    .col(
                        ColumnDef::new(PartyRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_rounds_room_round_unique")
                    .table(PartyRounds::Table)
                    .col(PartyRounds::RoomCode)
                    .col(PartyRounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_rounds_room_idx")
                    .table(PartyRounds::Table)
                    .col(PartyRounds::RoomCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartyScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartyScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartyScores::RoomCode)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyScores::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PartyScores::PlayerId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyScores::PlayerName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyScores::Score).integer().not_null())
                    .col(ColumnDef::new(PartyScores::TimeTaken).double().not_null())
                    .col(
                        ColumnDef::new(PartyScores::TargetColor)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartyScores::CapturedColor).string_len(50))
                    .col(ColumnDef::new(PartyScores::Similarity).double())
                    .col(
                        ColumnDef::new(PartyScores::GameType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartyScores::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_scores_round_player_unique")
                    .table(PartyScores::Table)
                    .col(PartyScores::RoundId)
                    .col(PartyScores::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_scores_room_idx")
                    .table(PartyScores::Table)
                    .col(PartyScores::RoomCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("party_scores_round_idx")
                    .table(PartyScores::Table)
                    .col(PartyScores::RoundId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartyScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PartyRounds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PartyPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PartyRooms::Table).to_owned())
            .await?;
        Ok(())
    }
}
