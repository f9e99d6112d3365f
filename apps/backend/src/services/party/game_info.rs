use sea_orm::DatabaseTransaction;
use serde::Serialize;
use time::OffsetDateTime;

use super::{PartyService, FALLBACK_TARGET_COLOR, MIN_PLAYERS};
use crate::entities::party_rooms::{GameKind, RoomState};
use crate::error::AppError;
use crate::repos::rounds::RoundResult;
use crate::repos::{players, rooms, rounds};

/// One player as rendered into GameInfo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfoPlayer {
    pub id: String,
    pub name: String,
    pub score: i32,
    pub attempts: i32,
    pub best_score: i32,
    pub session_score: f64,
    pub round_scores: Vec<i32>,
    pub joined_at: i64,
}

/// One completed round as rendered into GameInfo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfoRound {
    pub round: i32,
    pub game_type: GameKind,
    pub denner: String,
    pub players: Vec<RoundResult>,
    pub timestamp: i64,
}

/// One leaderboard line as rendered into GameInfo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardLine {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub session_score: f64,
    pub round_scores: Vec<i32>,
}

/// Denormalized snapshot of a room's full current state - the one read model
/// every polling client consumes. Produced on demand; never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub room_id: String,
    pub denner_id: String,
    pub denner_name: String,
    pub target_color: String,
    pub game_state: RoomState,
    pub game_type: Option<GameKind>,
    pub current_round: i32,
    pub max_rounds: i32,
    pub guess_time: i32,
    pub current_guess_time: i32,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub player_count: usize,
    pub max_players: i32,
    pub min_players: i32,
    pub players: Vec<GameInfoPlayer>,
    pub round_results: Vec<GameInfoRound>,
    pub session_leaderboard: Vec<LeaderboardLine>,
    pub denner_rotation: Vec<String>,
}

/// Unix milliseconds, the timestamp form the browser clients consume.
pub(crate) fn millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

impl PartyService {
    /// Assemble the GameInfo snapshot: room + active players + completed
    /// rounds + session leaderboard. Pure projection, performs no writes.
    pub async fn game_info(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;
        let players = players::list_active(txn, room_code).await?;
        let all_rounds = rounds::list_rounds(txn, room_code).await?;
        let leaderboard = self.leaderboard(txn, room_code).await?;

        Ok(GameInfo {
            room_id: room.room_code,
            denner_id: room.host_id,
            denner_name: room.host_name,
            target_color: room
                .target_color
                .unwrap_or_else(|| FALLBACK_TARGET_COLOR.to_string()),
            game_state: room.state,
            game_type: room.game_type,
            current_round: room.current_round,
            max_rounds: room.max_rounds,
            guess_time: room.guess_time,
            current_guess_time: room.current_guess_time,
            start_time: room.started_at.map(millis),
            end_time: room.ended_at.map(millis),
            player_count: players.len(),
            max_players: room.max_players,
            min_players: MIN_PLAYERS,
            players: players
                .into_iter()
                .map(|p| GameInfoPlayer {
                    id: p.player_id,
                    name: p.player_name,
                    score: p.score,
                    attempts: p.attempts,
                    best_score: p.best_score,
                    session_score: p.session_score,
                    round_scores: p.round_scores,
                    joined_at: millis(p.joined_at),
                })
                .collect(),
            round_results: all_rounds
                .into_iter()
                .filter(|r| r.is_completed)
                .map(|r| GameInfoRound {
                    round: r.round_no,
                    game_type: r.game_type,
                    denner: r.denner_name,
                    players: r.player_results,
                    timestamp: millis(r.created_at),
                })
                .collect(),
            session_leaderboard: leaderboard
                .into_iter()
                .enumerate()
                .map(|(idx, entry)| LeaderboardLine {
                    rank: idx + 1,
                    id: entry.player_id,
                    name: entry.player_name,
                    session_score: entry.session_score,
                    round_scores: entry.round_scores,
                })
                .collect(),
            denner_rotation: room.denner_rotation,
        })
    }
}
