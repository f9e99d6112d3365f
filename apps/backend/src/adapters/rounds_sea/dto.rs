//! DTOs for rounds_sea adapter.

use crate::entities::party_rooms::GameKind;

/// DTO for creating a new round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub room_code: String,
    pub round_no: i32,
    pub game_type: GameKind,
    pub denner_id: String,
    pub denner_name: String,
    pub target_color: String,
    pub guess_time: i32,
}
