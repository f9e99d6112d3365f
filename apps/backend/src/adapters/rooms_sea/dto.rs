//! DTOs for rooms_sea adapter.

use time::OffsetDateTime;

use crate::entities::party_rooms::{GameKind, RoomState};

/// DTO for creating a new room.
#[derive(Debug, Clone)]
pub struct RoomCreate {
    pub room_code: String,
    pub host_id: String,
    pub host_name: String,
    pub max_players: i32,
    pub max_rounds: i32,
    pub guess_time: i32,
    pub target_color: Option<String>,
}

impl RoomCreate {
    pub fn new(
        room_code: impl Into<String>,
        host_id: impl Into<String>,
        host_name: impl Into<String>,
    ) -> Self {
        Self {
            room_code: room_code.into(),
            host_id: host_id.into(),
            host_name: host_name.into(),
            max_players: 4,
            max_rounds: 3,
            guess_time: 30,
            target_color: None,
        }
    }

    pub fn with_max_players(mut self, max_players: i32) -> Self {
        self.max_players = max_players;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: i32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_guess_time(mut self, guess_time: i32) -> Self {
        self.guess_time = guess_time;
        self
    }

    pub fn with_target_color(mut self, target_color: impl Into<String>) -> Self {
        self.target_color = Some(target_color.into());
        self
    }
}

/// Unified DTO for updating room fields with optimistic locking.
///
/// Every setter is "no change unless called"; all requested changes are
/// applied atomically with a single lock_version increment.
/// `expected_version` validates that the current lock_version matches
/// before updating.
#[derive(Debug, Clone)]
pub struct RoomUpdate {
    pub room_code: String,
    pub expected_version: i32,
    pub state: Option<RoomState>,
    pub game_type: Option<GameKind>,
    pub target_color: Option<String>,
    pub current_round: Option<i32>,
    pub current_guess_time: Option<i32>,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub host_id: Option<String>,
    pub host_name: Option<String>,
    pub denner_rotation: Option<Vec<String>>,
}

impl RoomUpdate {
    pub fn new(room_code: impl Into<String>, expected_version: i32) -> Self {
        Self {
            room_code: room_code.into(),
            expected_version,
            state: None,
            game_type: None,
            target_color: None,
            current_round: None,
            current_guess_time: None,
            started_at: None,
            ended_at: None,
            host_id: None,
            host_name: None,
            denner_rotation: None,
        }
    }

    pub fn with_state(mut self, state: RoomState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_game_type(mut self, game_type: GameKind) -> Self {
        self.game_type = Some(game_type);
        self
    }

    pub fn with_target_color(mut self, target_color: impl Into<String>) -> Self {
        self.target_color = Some(target_color.into());
        self
    }

    pub fn with_current_round(mut self, round_no: i32) -> Self {
        self.current_round = Some(round_no);
        self
    }

    pub fn with_current_guess_time(mut self, seconds: i32) -> Self {
        self.current_guess_time = Some(seconds);
        self
    }

    pub fn with_started_at(mut self, at: OffsetDateTime) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn with_ended_at(mut self, at: OffsetDateTime) -> Self {
        self.ended_at = Some(at);
        self
    }

    pub fn with_host(mut self, host_id: impl Into<String>, host_name: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self.host_name = Some(host_name.into());
        self
    }

    pub fn with_denner_rotation(mut self, rotation: Vec<String>) -> Self {
        self.denner_rotation = Some(rotation);
        self
    }
}
