//! Party session orchestration - bridges the room/player/round/score repos
//! with the coarse session state machine and the GameInfo read model.
//!
//! The service owns no state of its own; every method runs against a caller
//! supplied transaction and re-reads whatever it needs, so operations stay
//! safe under the polling, at-least-once call pattern of the clients.

mod cleanup;
mod game_info;
mod membership;
mod room_lifecycle;
mod round_lifecycle;
mod scoring;

pub use cleanup::CleanupOutcome;
pub(crate) use game_info::millis;
pub use game_info::{GameInfo, GameInfoPlayer, GameInfoRound, LeaderboardLine};
pub use room_lifecycle::RoomOptions;
pub use scoring::SubmitScore;

/// Party session orchestration service.
#[derive(Default)]
pub struct PartyService;

impl PartyService {
    pub fn new() -> Self {
        Self
    }
}

/// Below this player count a session cannot meaningfully run; surfaced to
/// clients in GameInfo so the lobby can gate its start button.
pub(crate) const MIN_PLAYERS: i32 = 2;

/// Bounded retry budget for room code generation.
pub(crate) const MAX_CODE_ATTEMPTS: u32 = 10;

/// Fallbacks used when a round starts before the host picked a game type or
/// target color (the original clients tolerate both).
pub(crate) const FALLBACK_TARGET_COLOR: &str = "#ff0000";
