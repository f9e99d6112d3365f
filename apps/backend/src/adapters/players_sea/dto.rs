//! DTOs for players_sea adapter.

/// DTO for the join/rejoin upsert.
#[derive(Debug, Clone)]
pub struct PlayerUpsert {
    pub room_code: String,
    pub player_id: String,
    pub player_name: String,
}

/// DTO for caller-driven player updates (heartbeat, rename).
/// `last_seen` is always refreshed by the adapter.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub player_name: Option<String>,
}

/// Recomputed aggregates persisted onto the player row after a score write.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAggregatesUpdate {
    pub total_score: i32,
    pub attempts: i32,
    pub best_score: i32,
    pub session_score: f64,
    pub round_scores: Vec<i32>,
}
