//! DTOs for scores_sea adapter.

use crate::entities::party_rooms::GameKind;

/// DTO for the submit-score upsert.
#[derive(Debug, Clone)]
pub struct ScoreSave {
    pub room_code: String,
    pub round_id: i64,
    pub player_id: String,
    pub player_name: String,
    pub score: i32,
    pub time_taken: f64,
    pub target_color: String,
    pub captured_color: Option<String>,
    pub similarity: Option<f64>,
    pub game_type: GameKind,
}
