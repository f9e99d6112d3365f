//! Error codes for the party backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP problem responses. Add new codes here; never pass
//! ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes for the party backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Required field missing or malformed
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Room is at capacity
    RoomFull,
    /// Round limit for the session reached
    RoundLimitReached,

    // Resource not found
    /// Room not found (or inactive)
    RoomNotFound,
    /// Player not found in room
    PlayerNotFound,
    /// Round not found for the room's current round number
    RoundNotFound,
    /// General not found error
    NotFound,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    // Conflicts
    /// Room code already taken by an active room
    RoomCodeConflict,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Unique constraint violation outside the expected upsert paths
    UniqueViolation,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Authentication
    /// Missing or wrong admin token
    Unauthorized,

    // System errors
    /// Could not generate a free room code within the retry budget
    RoomCodeExhausted,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for HTTP responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::RoomFull => "ROOM_FULL",
            ErrorCode::RoundLimitReached => "ROUND_LIMIT_REACHED",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::PlayerNotFound => "PLAYER_NOT_FOUND",
            ErrorCode::RoundNotFound => "ROUND_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RecordNotFound => "RECORD_NOT_FOUND",
            ErrorCode::RoomCodeConflict => "ROOM_CODE_CONFLICT",
            ErrorCode::OptimisticLock => "OPTIMISTIC_LOCK",
            ErrorCode::UniqueViolation => "UNIQUE_VIOLATION",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::RoomCodeExhausted => "ROOM_CODE_EXHAUSTED",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
