//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts through this
//! translator so that constraint violations and lock conflicts surface as
//! typed domain errors instead of opaque database strings.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        return rest.split_whitespace().next();
    }
    None
}

/// Map a violated unique constraint to a domain conflict, by constraint name
/// (Postgres) or table.column (SQLite).
fn map_unique_violation(error_msg: &str) -> (ConflictKind, String) {
    if error_msg.contains("party_rooms_room_code")
        || extract_sqlite_table_column(error_msg) == Some("party_rooms.room_code")
    {
        return (
            ConflictKind::RoomCodeConflict,
            "Room code already taken by an active room".to_string(),
        );
    }
    // (room_code, player_id) and (round_id, player_id) collisions go through
    // upsert paths in normal operation; reaching here means a raw insert raced.
    (
        ConflictKind::UniqueViolation,
        "Unique constraint violation".to_string(),
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            // Structured payload from the rooms adapter: expected/actual versions
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Room was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Room was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, "Unique constraint violation");
        let (kind, detail) = map_unique_violation(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    warn!(trace_id = %trace_id, error = %error_msg, "Unmapped database error");
    DomainError::infra(InfraErrorKind::Other("Db".into()), error_msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = map_db_err(sea_orm::DbErr::RecordNotFound("party_rooms".into()));
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }

    #[test]
    fn optimistic_lock_payload_is_parsed() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "OPTIMISTIC_LOCK:{\"expected\":3,\"actual\":4}".into(),
        ));
        match err {
            DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                assert!(detail.contains("expected version 3"));
                assert!(detail.contains("actual version 4"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn sqlite_room_code_collision_maps_to_room_code_conflict() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: party_rooms.room_code".into(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::RoomCodeConflict, _)
        ));
    }

    #[test]
    fn postgres_duplicate_key_maps_to_unique_violation() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"party_scores_round_player_unique\""
                .into(),
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueViolation, _)
        ));
    }
}
