use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{GameInfo, PartyService};
use crate::adapters::players_sea::PlayerUpdate;
use crate::adapters::rooms_sea::RoomUpdate;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::players::Player;
use crate::repos::{players, rooms};

impl PartyService {
    /// Join a room, or re-join after a disconnect.
    ///
    /// The capacity check and the insert run in one transaction, and the
    /// (room_code, player_id) unique key means two racing joins for the same
    /// player collapse into one row. A player who already holds an active
    /// seat may re-join a full room - the upsert only refreshes their row.
    pub async fn join_room(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        player_id: &str,
        player_name: &str,
    ) -> Result<GameInfo, AppError> {
        if player_id.is_empty() || player_name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingField,
                "Player id and name are required",
            )
            .into());
        }

        let room = rooms::require_room(txn, room_code).await?;

        let existing = players::find_by_room_and_player(txn, room_code, player_id).await?;
        let holds_active_seat = existing.map(|p| p.is_active).unwrap_or(false);

        if !holds_active_seat {
            let seated = players::count_active(txn, room_code).await?;
            if seated >= room.max_players as u64 {
                return Err(DomainError::validation(
                    ValidationKind::RoomFull,
                    format!("Room {room_code} is full ({} players)", room.max_players),
                )
                .into());
            }
        }

        players::upsert_player(txn, room_code, player_id, player_name).await?;
        info!(room_code, player_id, rejoin = holds_active_seat, "player joined");

        self.game_info(txn, room_code).await
    }

    /// Active players of a room, earliest joined first.
    pub async fn list_players(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
    ) -> Result<Vec<Player>, AppError> {
        rooms::require_room(txn, room_code).await?;
        Ok(players::list_active(txn, room_code).await?)
    }

    /// Caller-driven player update (rename / liveness heartbeat).
    pub async fn update_player(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        player_id: &str,
        player_name: Option<String>,
    ) -> Result<Player, AppError> {
        rooms::require_room(txn, room_code).await?;
        let player =
            players::update_player(txn, room_code, player_id, PlayerUpdate { player_name })
                .await?;
        Ok(player)
    }

    /// Leave a room. When the host leaves, the earliest-joined remaining
    /// player inherits the room and moves to the front of the denner
    /// rotation; when the last player leaves, the room is deactivated.
    ///
    /// Returns None when the room no longer exists (or was torn down here).
    pub async fn leave_room(
        &self,
        txn: &DatabaseTransaction,
        room_code: &str,
        player_id: &str,
    ) -> Result<Option<GameInfo>, AppError> {
        let Some(room) = rooms::find_by_code(txn, room_code).await? else {
            return Ok(None);
        };

        players::remove_player(txn, room_code, player_id).await?;
        info!(room_code, player_id, "player left");

        if room.host_id == player_id {
            let remaining = players::list_active(txn, room_code).await?;
            match remaining.first() {
                Some(new_host) => {
                    let rotation: Vec<String> = std::iter::once(new_host.player_id.clone())
                        .chain(
                            room.denner_rotation
                                .iter()
                                .filter(|id| **id != player_id && **id != new_host.player_id)
                                .cloned(),
                        )
                        .collect();

                    rooms::update_room(
                        txn,
                        RoomUpdate::new(room_code, room.lock_version)
                            .with_host(&new_host.player_id, &new_host.player_name)
                            .with_denner_rotation(rotation),
                    )
                    .await?;
                    debug!(room_code, new_host = %new_host.player_id, "host handed off");
                }
                None => {
                    rooms::deactivate_room(txn, room_code).await?;
                    info!(room_code, "last player left, room deactivated");
                    return Ok(None);
                }
            }
        }

        Ok(Some(self.game_info(txn, room_code).await?))
    }
}
