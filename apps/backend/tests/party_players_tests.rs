//! Membership: join, capacity, rejoin, heartbeat, leave and host hand-off.

mod support;

use backend::db::txn::with_txn;
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::repos::players;
use backend::services::party::{PartyService, RoomOptions};
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;

async fn new_room(
    txn: &sea_orm::DatabaseTransaction,
    service: &PartyService,
    host_id: &str,
    options: RoomOptions,
) -> Result<String, AppError> {
    let info = service
        .create_room(txn, host_id, "Host", None, options)
        .await?;
    Ok(info.room_id)
}

#[tokio::test]
async fn join_seats_players_in_join_order() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let host = unique_str("host");
            let room = new_room(txn, &service, &host, RoomOptions::default()).await?;

            service.join_room(txn, &room, "bob", "Bob").await?;
            let info = service.join_room(txn, &room, "carol", "Carol").await?;

            assert_eq!(info.player_count, 3);
            let ids: Vec<&str> = info.players.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec![host.as_str(), "bob", "carol"]);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn join_into_missing_room_fails() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let result = service.join_room(txn, "NOSUCH", "bob", "Bob").await;

            assert!(matches!(
                result,
                Err(AppError::NotFound {
                    code: ErrorCode::RoomNotFound,
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
async fn join_beyond_capacity_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let room = new_room(
                txn,
                &service,
                &unique_str("host"),
                RoomOptions {
                    max_players: Some(2),
                    ..RoomOptions::default()
                },
            )
            .await?;

            // Host occupies seat one; Bob takes the second and last.
            service.join_room(txn, &room, "bob", "Bob").await?;

            let result = service.join_room(txn, &room, "carol", "Carol").await;
            assert!(matches!(
                result,
                Err(AppError::Validation {
                    code: ErrorCode::RoomFull,
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
async fn active_member_can_rejoin_a_full_room() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let room = new_room(
                txn,
                &service,
                &unique_str("host"),
                RoomOptions {
                    max_players: Some(2),
                    ..RoomOptions::default()
                },
            )
            .await?;

            service.join_room(txn, &room, "bob", "Bob").await?;

            // Bob reconnects; the roster must not grow.
            let info = service.join_room(txn, &room, "bob", "Bob").await?;
            assert_eq!(info.player_count, 2);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn leave_and_rejoin_reactivates_the_same_row() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let room = new_room(txn, &service, &unique_str("host"), RoomOptions::default()).await?;

            service.join_room(txn, &room, "bob", "Bob").await?;
            let first = players::find_by_room_and_player(txn, &room, "bob")
                .await?
                .expect("bob exists");

            service.leave_room(txn, &room, "bob").await?;
            let gone = players::find_by_room_and_player(txn, &room, "bob")
                .await?
                .expect("row survives leave");
            assert!(!gone.is_active);

            service.join_room(txn, &room, "bob", "Bob").await?;
            let back = players::find_by_room_and_player(txn, &room, "bob")
                .await?
                .expect("bob is back");
            assert!(back.is_active);
            assert_eq!(back.id, first.id, "rejoin must reuse the row, not duplicate it");

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn update_player_refreshes_last_seen_and_rename() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let room = new_room(txn, &service, &unique_str("host"), RoomOptions::default()).await?;
            service.join_room(txn, &room, "bob", "Bob").await?;

            let before = players::find_by_room_and_player(txn, &room, "bob")
                .await?
                .expect("bob exists");

            let updated = service
                .update_player(txn, &room, "bob", Some("Bobby".to_string()))
                .await?;
            assert_eq!(updated.player_name, "Bobby");
            assert!(updated.last_seen >= before.last_seen);

            let result = service.update_player(txn, &room, "nobody", None).await;
            assert!(matches!(
                result,
                Err(AppError::NotFound {
                    code: ErrorCode::PlayerNotFound,
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
async fn host_leave_promotes_earliest_joined_player() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let host = unique_str("host");
            let room = new_room(txn, &service, &host, RoomOptions::default()).await?;

            service.join_room(txn, &room, "bob", "Bob").await?;
            service.join_room(txn, &room, "carol", "Carol").await?;

            let info = service
                .leave_room(txn, &room, &host)
                .await?
                .expect("room survives with players left");

            assert_eq!(info.denner_id, "bob", "earliest joined remaining player inherits");
            assert_eq!(info.denner_name, "Bob");
            assert_eq!(info.denner_rotation.first().map(String::as_str), Some("bob"));
            assert!(!info.denner_rotation.contains(&host));
            // no duplicate entries after the reshuffle
            let mut rotation = info.denner_rotation.clone();
            rotation.dedup();
            assert_eq!(rotation, info.denner_rotation);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn last_player_leaving_tears_the_room_down() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let host = unique_str("host");
            let room = new_room(txn, &service, &host, RoomOptions::default()).await?;

            let outcome = service.leave_room(txn, &room, &host).await?;
            assert!(outcome.is_none());

            let result = service.game_info(txn, &room).await;
            assert!(matches!(
                result,
                Err(AppError::NotFound {
                    code: ErrorCode::RoomNotFound,
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
async fn leaving_a_missing_room_returns_none() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let outcome = service.leave_room(txn, "NOSUCH", "bob").await?;
            assert!(outcome.is_none());

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}
