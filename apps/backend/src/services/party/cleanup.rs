use sea_orm::DatabaseTransaction;
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::info;

use super::PartyService;
use crate::error::AppError;
use crate::repos::{players, rooms};

/// What a cleanup sweep deactivated.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CleanupOutcome {
    pub rooms: u64,
    pub players: u64,
}

impl PartyService {
    /// Periodic, externally triggered sweep: deactivate rooms untouched for
    /// `room_age_hours` and players unseen for `player_age_hours`.
    pub async fn cleanup_inactive(
        &self,
        txn: &DatabaseTransaction,
        room_age_hours: i64,
        player_age_hours: i64,
    ) -> Result<CleanupOutcome, AppError> {
        let now = OffsetDateTime::now_utc();
        let room_cutoff = now - Duration::hours(room_age_hours);
        let player_cutoff = now - Duration::hours(player_age_hours);

        let rooms = rooms::deactivate_stale(txn, room_cutoff).await?;
        let players = players::deactivate_stale(txn, player_cutoff).await?;

        info!(rooms, players, room_age_hours, player_age_hours, "cleanup sweep done");
        Ok(CleanupOutcome { rooms, players })
    }
}
