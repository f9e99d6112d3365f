use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{GameInfo, PartyService, MAX_CODE_ATTEMPTS};
use crate::adapters::rooms_sea::{RoomCreate, RoomUpdate};
use crate::entities::party_rooms::{GameKind, RoomState};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::domain::session;
use crate::repos::{players, rooms};
use crate::utils::room_code::generate_room_code;

/// Optional knobs for room creation; unset fields fall back to 4 players,
/// 3 rounds, 30 seconds.
#[derive(Debug, Clone, Default)]
pub struct RoomOptions {
    pub max_players: Option<i32>,
    pub max_rounds: Option<i32>,
    pub guess_time: Option<i32>,
}

impl PartyService {
    /// Create a room with a freshly generated code and the host as its first
    /// player.
    pub async fn create_room(
        &self,
        txn: &DatabaseTransaction,
        host_id: &str,
        host_name: &str,
        target_color: Option<&str>,
        options: RoomOptions,
    ) -> Result<GameInfo, AppError> {
        self.create_room_with_code_source(txn, host_id, host_name, target_color, options, || {
            generate_room_code()
        })
        .await
    }

    /// Room creation with an injectable code source, so the bounded retry
    /// loop is testable without owning the RNG.
    pub async fn create_room_with_code_source(
        &self,
        txn: &DatabaseTransaction,
        host_id: &str,
        host_name: &str,
        target_color: Option<&str>,
        options: RoomOptions,
        mut next_code: impl FnMut() -> String,
    ) -> Result<GameInfo, AppError> {
        if host_id.is_empty() || host_name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingField,
                "Host id and name are required",
            )
            .into());
        }

        // Draw codes until one is free among active rooms, up to the budget.
        let mut room_code = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = next_code();
            if rooms::find_by_code(txn, &candidate).await?.is_none() {
                room_code = Some(candidate);
                break;
            }
        }
        let room_code = room_code.ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::RoomCodeExhausted,
                format!("No free room code after {MAX_CODE_ATTEMPTS} attempts"),
            )
        })?;

        let mut dto = RoomCreate::new(&room_code, host_id, host_name);
        if let Some(max_players) = options.max_players {
            dto = dto.with_max_players(max_players);
        }
        if let Some(max_rounds) = options.max_rounds {
            dto = dto.with_max_rounds(max_rounds);
        }
        if let Some(guess_time) = options.guess_time {
            dto = dto.with_guess_time(guess_time);
        }
        if let Some(color) = target_color {
            dto = dto.with_target_color(color);
        }

        let room = rooms::create_room(txn, dto).await?;

        // The host is a player like everyone else.
        players::upsert_player(txn, &room.room_code, host_id, host_name).await?;

        info!(room_code = %room.room_code, host_id, "party room created");
        self.game_info(txn, &room.room_code).await
    }

    /// Soft-close a room; idempotent.
    pub async fn deactivate_room(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<(), AppError> {
        rooms::deactivate_room(txn, room_code).await?;
        info!(room_code, "party room deactivated");
        Ok(())
    }

    /// Pick the game type for the upcoming round; moves the session into
    /// game selection.
    pub async fn select_game_type(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        game_type: GameKind,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;
        if !session::transition_allowed(&room.state, &RoomState::GameSelection) {
            return Err(DomainError::validation(
                ValidationKind::Other("STATE".into()),
                format!("Cannot select a game type while {:?}", room.state),
            )
            .into());
        }

        rooms::update_room(
            txn,
            RoomUpdate::new(room_code, room.lock_version)
                .with_game_type(game_type)
                .with_state(RoomState::GameSelection),
        )
        .await?;
        debug!(room_code, game_type = ?game_type, "transition: -> gameSelection");

        self.game_info(txn, room_code).await
    }

    /// Set the target color the denner picked for the upcoming round.
    pub async fn set_target_color(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        target_color: &str,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;
        rooms::update_room(
            txn,
            RoomUpdate::new(room_code, room.lock_version).with_target_color(target_color),
        )
        .await?;
        self.game_info(txn, room_code).await
    }

    /// Host-granted mid-round time extension; no state change.
    pub async fn extend_time(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        additional_seconds: i32,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;
        let extended = room.current_guess_time + additional_seconds;
        rooms::update_room(
            txn,
            RoomUpdate::new(room_code, room.lock_version).with_current_guess_time(extended),
        )
        .await?;
        debug!(room_code, extended, "guess time extended");
        self.game_info(txn, room_code).await
    }

    /// roundFinished -> gameSelection, for the next round of the session.
    pub async fn continue_session(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;
        if !session::transition_allowed(&room.state, &RoomState::GameSelection) {
            return Err(DomainError::validation(
                ValidationKind::Other("STATE".into()),
                format!("Cannot continue the session while {:?}", room.state),
            )
            .into());
        }

        rooms::update_room(
            txn,
            RoomUpdate::new(room_code, room.lock_version).with_state(RoomState::GameSelection),
        )
        .await?;
        debug!(room_code, "transition: roundFinished -> gameSelection");

        self.game_info(txn, room_code).await
    }

    /// Explicit session end; allowed from any state and terminal.
    pub async fn end_session(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<GameInfo, AppError> {
        let room = rooms::require_room(txn, room_code).await?;
        rooms::update_room(
            txn,
            RoomUpdate::new(room_code, room.lock_version)
                .with_state(RoomState::SessionFinished)
                .with_ended_at(time::OffsetDateTime::now_utc()),
        )
        .await?;
        info!(room_code, "session ended");

        self.game_info(txn, room_code).await
    }
}
