use sea_orm::DatabaseTransaction;
use tracing::{debug, info, warn};

use super::{GameInfo, PartyService, FALLBACK_TARGET_COLOR};
use crate::adapters::rooms_sea::RoomUpdate;
use crate::adapters::rounds_sea::RoundCreate;
use crate::entities::party_rooms::{GameKind, RoomState};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::domain::session;
use crate::repos::rounds::RoundResult;
use crate::repos::{rooms, rounds, scores};

impl PartyService {
    /// Start the next round: create the round row and move the room to
    /// playing with a fresh guess timer.
    ///
    /// The (room_code, round_no) unique key plus the room's lock_version
    /// turn two hosts racing this call into one winner and one conflict,
    /// instead of two rounds created from a stale current_round read.
    pub async fn start_round(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;

        let next_round = room.current_round + 1;
        if next_round > room.max_rounds {
            return Err(DomainError::validation(
                ValidationKind::RoundLimitReached,
                format!(
                    "Session already played its {} rounds",
                    room.max_rounds
                ),
            )
            .into());
        }

        let game_type = room.game_type.unwrap_or(GameKind::ColorMixing);
        let target_color = room
            .target_color
            .clone()
            .unwrap_or_else(|| FALLBACK_TARGET_COLOR.to_string());

        rounds::create_round(
            txn,
            RoundCreate {
                room_code: room_code.to_string(),
                round_no: next_round,
                game_type,
                denner_id: room.host_id.clone(),
                denner_name: room.host_name.clone(),
                target_color,
                guess_time: room.guess_time,
            },
        )
        .await?;

        rooms::update_room(
            txn,
            RoomUpdate::new(room_code, room.lock_version)
                .with_current_round(next_round)
                .with_state(RoomState::Playing)
                .with_started_at(time::OffsetDateTime::now_utc())
                .with_current_guess_time(room.guess_time),
        )
        .await?;

        info!(room_code, round = next_round, "round started");
        debug!(room_code, "transition: -> playing");

        self.game_info(txn, room_code).await
    }

    /// Finish the current round: attach result summaries from its scores,
    /// mark it completed, and advance the session state.
    ///
    /// Round timers are enforced by polling clients, so this arrives late,
    /// early, or repeatedly; a call on an already-settled room is a no-op
    /// read. A missing round row (caller error or lost race) is a
    /// recoverable inconsistency: the state still advances, the round row
    /// is simply skipped.
    pub async fn end_round(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;

        if session::is_round_settled(&room.state) {
            debug!(room_code, state = ?room.state, "end_round repeat ignored");
            return self.game_info(txn, room_code).await;
        }

        match rounds::find_by_room_and_no(txn, room_code, room.current_round).await? {
            Some(round) if !round.is_completed => {
                let round_scores = scores::list_by_round(txn, round.id).await?;
                let results: Vec<RoundResult> = round_scores
                    .into_iter()
                    .map(|s| RoundResult {
                        id: s.player_id,
                        name: s.player_name,
                        score: s.score,
                        attempts: 1,
                    })
                    .collect();
                rounds::complete_round(txn, round.id, &results).await?;
            }
            Some(_) => {
                debug!(room_code, round = room.current_round, "round already completed");
            }
            None => {
                warn!(
                    room_code,
                    round = room.current_round,
                    "no round row for current round; advancing state anyway"
                );
            }
        }

        let next_state = session::next_state_after_round(room.current_round, room.max_rounds);
        let mut update = RoomUpdate::new(room_code, room.lock_version).with_state(next_state.clone());
        if next_state == RoomState::SessionFinished {
            update = update.with_ended_at(time::OffsetDateTime::now_utc());
        }
        rooms::update_room(txn, update).await?;

        info!(room_code, round = room.current_round, state = ?next_state, "round ended");

        self.game_info(txn, room_code).await
    }

    /// Round history of a room, in round order.
    pub async fn list_rounds(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<Vec<crate::repos::rounds::Round>, AppError> {
        rooms::require_room(txn, room_code).await?;
        Ok(rounds::list_rounds(txn, room_code).await?)
    }
}
