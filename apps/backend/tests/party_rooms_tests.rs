//! Room lifecycle: creation defaults, code generation, deactivation.

mod support;

use backend::db::txn::with_txn;
use backend::entities::party_rooms::RoomState;
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::services::party::{PartyService, RoomOptions};
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;

#[tokio::test]
async fn create_room_applies_defaults_and_seats_host() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let host_id = unique_str("host");
            let info = service
                .create_room(txn, &host_id, "Alice", Some("#22aa66"), RoomOptions::default())
                .await?;

            assert_eq!(info.max_players, 4);
            assert_eq!(info.max_rounds, 3);
            assert_eq!(info.guess_time, 30);
            assert_eq!(info.current_guess_time, 30);
            assert_eq!(info.current_round, 0);
            assert_eq!(info.game_state, RoomState::Lobby);
            assert_eq!(info.game_type, None);
            assert_eq!(info.target_color, "#22aa66");
            assert_eq!(info.denner_id, host_id);
            assert_eq!(info.denner_rotation, vec![host_id.clone()]);

            // Host is seated as the first player
            assert_eq!(info.player_count, 1);
            assert_eq!(info.players[0].id, host_id);
            assert_eq!(info.players[0].name, "Alice");

            // Shareable code: 6 chars, uppercase alphanumeric
            assert_eq!(info.room_id.len(), 6);
            assert!(info
                .room_id
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn create_room_honors_options() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(
                    txn,
                    &unique_str("host"),
                    "Alice",
                    None,
                    RoomOptions {
                        max_players: Some(8),
                        max_rounds: Some(5),
                        guess_time: Some(45),
                    },
                )
                .await?;

            assert_eq!(info.max_players, 8);
            assert_eq!(info.max_rounds, 5);
            assert_eq!(info.guess_time, 45);
            assert_eq!(info.current_guess_time, 45);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn create_room_rejects_blank_host() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let result = service
                .create_room(txn, "", "Alice", None, RoomOptions::default())
                .await;

            assert!(matches!(
                result,
                Err(AppError::Validation {
                    code: ErrorCode::ValidationError,
                    ..
                })
            ));

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn code_generation_retries_until_free_code() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();

            // Occupy "COLIDE", then hand the generator a source that yields
            // the taken code twice before a fresh one.
            service
                .create_room_with_code_source(
                    txn,
                    &unique_str("host"),
                    "First",
                    None,
                    RoomOptions::default(),
                    || "COLIDE".to_string(),
                )
                .await?;

            let mut draws = 0;
            let info = service
                .create_room_with_code_source(
                    txn,
                    &unique_str("host"),
                    "Second",
                    None,
                    RoomOptions::default(),
                    || {
                        draws += 1;
                        if draws <= 2 {
                            "COLIDE".to_string()
                        } else {
                            "FREE42".to_string()
                        }
                    },
                )
                .await?;

            assert_eq!(info.room_id, "FREE42");
            assert_eq!(draws, 3);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn code_generation_exhausts_after_ten_collisions() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();

            service
                .create_room_with_code_source(
                    txn,
                    &unique_str("host"),
                    "First",
                    None,
                    RoomOptions::default(),
                    || "COLIDE".to_string(),
                )
                .await?;

            // Every draw collides with the active room above.
            let mut draws = 0;
            let result = service
                .create_room_with_code_source(
                    txn,
                    &unique_str("host"),
                    "Second",
                    None,
                    RoomOptions::default(),
                    || {
                        draws += 1;
                        "COLIDE".to_string()
                    },
                )
                .await;

            assert_eq!(draws, 10);
            assert!(matches!(
                result,
                Err(AppError::Internal {
                    code: ErrorCode::RoomCodeExhausted,
                    ..
                })
            ));

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn deactivated_room_reads_as_missing() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(txn, &unique_str("host"), "Alice", None, RoomOptions::default())
                .await?;
            let room_code = info.room_id;

            service.deactivate_room(txn, &room_code).await?;

            let result = service.game_info(txn, &room_code).await;
            assert!(matches!(
                result,
                Err(AppError::NotFound {
                    code: ErrorCode::RoomNotFound,
                    ..
                })
            ));

            // Repeating the deactivation is a no-op
            service.deactivate_room(txn, &room_code).await?;

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}
