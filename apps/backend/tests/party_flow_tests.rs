//! End-to-end session flow: state machine transitions, round progression,
//! repeat-safe round ending.

mod support;

use backend::db::txn::with_txn;
use backend::entities::party_rooms::{GameKind, RoomState};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::repos::rounds;
use backend::services::party::{PartyService, RoomOptions, SubmitScore};
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;

fn submission(player_id: &str, player_name: &str, score: i32, time_taken: f64) -> SubmitScore {
    SubmitScore {
        player_id: player_id.to_string(),
        player_name: player_name.to_string(),
        score,
        time_taken,
        captured_color: None,
        similarity: None,
    }
}

/// The full two-round script: Alice hosts, Bob joins, Bob wins on average.
#[tokio::test]
async fn two_round_session_end_to_end() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let alice = unique_str("alice");
            let info = service
                .create_room(
                    txn,
                    &alice,
                    "Alice",
                    Some("#336699"),
                    RoomOptions {
                        max_players: Some(2),
                        max_rounds: Some(2),
                        guess_time: None,
                    },
                )
                .await?;
            let room = info.room_id;

            service.join_room(txn, &room, "bob", "Bob").await?;

            let info = service
                .select_game_type(txn, &room, GameKind::FindColor)
                .await?;
            assert_eq!(info.game_state, RoomState::GameSelection);
            assert_eq!(info.game_type, Some(GameKind::FindColor));

            // Round 1
            let info = service.start_round(txn, &room).await?;
            assert_eq!(info.game_state, RoomState::Playing);
            assert_eq!(info.current_round, 1);
            assert!(info.start_time.is_some());

            let round1 = rounds::find_by_room_and_no(txn, &room, 1)
                .await?
                .expect("round 1 row exists");
            assert_eq!(round1.game_type, GameKind::FindColor);
            assert_eq!(round1.target_color, "#336699");
            assert!(!round1.is_completed);

            service
                .submit_score(txn, &room, submission(&alice, "Alice", 90, 4.2))
                .await?;
            service
                .submit_score(txn, &room, submission("bob", "Bob", 70, 6.8))
                .await?;

            let info = service.end_round(txn, &room).await?;
            assert_eq!(info.game_state, RoomState::RoundFinished);
            assert_eq!(info.round_results.len(), 1);
            assert_eq!(info.round_results[0].round, 1);
            // results ordered best first
            assert_eq!(info.round_results[0].players[0].id, alice);
            assert_eq!(info.round_results[0].players[0].score, 90);

            let round1 = rounds::find_by_room_and_no(txn, &room, 1)
                .await?
                .expect("round 1 row exists");
            assert!(round1.is_completed);
            assert!(round1.ended_at.is_some());

            // Between rounds
            let info = service.continue_session(txn, &room).await?;
            assert_eq!(info.game_state, RoomState::GameSelection);

            // Round 2 - the last one
            let info = service.start_round(txn, &room).await?;
            assert_eq!(info.current_round, 2);

            service
                .submit_score(txn, &room, submission(&alice, "Alice", 70, 5.0))
                .await?;
            service
                .submit_score(txn, &room, submission("bob", "Bob", 95, 3.1))
                .await?;

            let info = service.end_round(txn, &room).await?;
            assert_eq!(info.game_state, RoomState::SessionFinished);
            assert!(info.end_time.is_some());

            // Bob wins on average: 82.5 over Alice's 80.0
            assert_eq!(info.session_leaderboard.len(), 2);
            assert_eq!(info.session_leaderboard[0].id, "bob");
            assert_eq!(info.session_leaderboard[0].rank, 1);
            assert_eq!(info.session_leaderboard[0].session_score, 82.5);
            assert_eq!(info.session_leaderboard[0].round_scores, vec![70, 95]);
            assert_eq!(info.session_leaderboard[1].id, alice);
            assert_eq!(info.session_leaderboard[1].session_score, 80.0);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn current_round_never_exceeds_max_rounds() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(
                    txn,
                    &unique_str("host"),
                    "Host",
                    None,
                    RoomOptions {
                        max_rounds: Some(1),
                        ..RoomOptions::default()
                    },
                )
                .await?;
            let room = info.room_id;

            service.start_round(txn, &room).await?;

            let result = service.start_round(txn, &room).await;
            assert!(matches!(
                result,
                Err(AppError::Validation {
                    code: ErrorCode::RoundLimitReached,
                    ..
                })
            ));

            let info = service.game_info(txn, &room).await?;
            assert_eq!(info.current_round, 1);
            assert!(info.current_round <= info.max_rounds);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn end_round_is_safe_to_repeat() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let host = unique_str("host");
            let info = service
                .create_room(txn, &host, "Host", None, RoomOptions::default())
                .await?;
            let room = info.room_id;

            service.start_round(txn, &room).await?;
            service
                .submit_score(txn, &room, submission(&host, "Host", 50, 9.9))
                .await?;

            let first = service.end_round(txn, &room).await?;
            assert_eq!(first.game_state, RoomState::RoundFinished);
            let round_after_first = rounds::find_by_room_and_no(txn, &room, 1)
                .await?
                .expect("round exists");

            // Two more polling clients fire endRound late.
            let second = service.end_round(txn, &room).await?;
            let third = service.end_round(txn, &room).await?;
            assert_eq!(second.game_state, RoomState::RoundFinished);
            assert_eq!(third.game_state, RoomState::RoundFinished);

            let round_after_third = rounds::find_by_room_and_no(txn, &room, 1)
                .await?
                .expect("round exists");
            assert_eq!(
                round_after_first.ended_at, round_after_third.ended_at,
                "repeats must not touch the round row"
            );

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn end_round_with_missing_round_row_still_advances_state() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(txn, &unique_str("host"), "Host", None, RoomOptions::default())
                .await?;
            let room = info.room_id;

            // No startRound was ever called; current_round is 0 and no round
            // row exists. The transition still happens.
            let info = service.end_round(txn, &room).await?;
            assert_eq!(info.game_state, RoomState::RoundFinished);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn continue_session_is_rejected_mid_round() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(txn, &unique_str("host"), "Host", None, RoomOptions::default())
                .await?;
            let room = info.room_id;

            service.start_round(txn, &room).await?;

            let result = service.continue_session(txn, &room).await;
            assert!(matches!(result, Err(AppError::Validation { .. })));

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn end_session_is_terminal_from_any_state() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(txn, &unique_str("host"), "Host", None, RoomOptions::default())
                .await?;
            let room = info.room_id;

            service.start_round(txn, &room).await?;
            let info = service.end_session(txn, &room).await?;
            assert_eq!(info.game_state, RoomState::SessionFinished);
            assert!(info.end_time.is_some());

            // Terminal: no more game selection
            let result = service.continue_session(txn, &room).await;
            assert!(matches!(result, Err(AppError::Validation { .. })));

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn extend_time_bumps_the_timer_without_state_change() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(txn, &unique_str("host"), "Host", None, RoomOptions::default())
                .await?;
            let room = info.room_id;

            service.start_round(txn, &room).await?;
            let info = service.extend_time(txn, &room, 30).await?;

            assert_eq!(info.current_guess_time, 60);
            assert_eq!(info.game_state, RoomState::Playing);
            assert_eq!(info.guess_time, 30, "configured per-round limit is untouched");

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn start_round_falls_back_to_color_mixing() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let info = service
                .create_room(txn, &unique_str("host"), "Host", None, RoomOptions::default())
                .await?;
            let room = info.room_id;

            // Straight from the lobby, no game type selected.
            service.start_round(txn, &room).await?;

            let round = rounds::find_by_room_and_no(txn, &room, 1)
                .await?
                .expect("round exists");
            assert_eq!(round.game_type, GameKind::ColorMixing);
            assert_eq!(round.target_color, "#ff0000");

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}
