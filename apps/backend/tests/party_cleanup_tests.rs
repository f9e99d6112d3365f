//! Cleanup sweep: stale rooms and players are deactivated, fresh ones spared.

mod support;

use backend::db::txn::with_txn;
use backend::entities::{party_players, party_rooms};
use backend::error::AppError;
use backend::services::party::{PartyService, RoomOptions};
use backend_test_support::unique_helpers::unique_str;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use time::{Duration, OffsetDateTime};

use crate::support::build_test_state;

async fn backdate_room(
    txn: &sea_orm::DatabaseTransaction,
    room_code: &str,
    hours: i64,
) -> Result<(), AppError> {
    let stale = OffsetDateTime::now_utc() - Duration::hours(hours);
    party_rooms::Entity::update_many()
        .col_expr(party_rooms::Column::UpdatedAt, Expr::val(stale).into())
        .filter(party_rooms::Column::RoomCode.eq(room_code))
        .exec(txn)
        .await?;
    Ok(())
}

async fn backdate_player(
    txn: &sea_orm::DatabaseTransaction,
    room_code: &str,
    player_id: &str,
    hours: i64,
) -> Result<(), AppError> {
    let stale = OffsetDateTime::now_utc() - Duration::hours(hours);
    party_players::Entity::update_many()
        .col_expr(party_players::Column::LastSeen, Expr::val(stale).into())
        .filter(party_players::Column::RoomCode.eq(room_code))
        .filter(party_players::Column::PlayerId.eq(player_id))
        .exec(txn)
        .await?;
    Ok(())
}

#[tokio::test]
async fn stale_rooms_are_swept_and_fresh_ones_spared() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();

            let stale_room = service
                .create_room(txn, &unique_str("host"), "Stale", None, RoomOptions::default())
                .await?
                .room_id;
            let fresh_room = service
                .create_room(txn, &unique_str("host"), "Fresh", None, RoomOptions::default())
                .await?
                .room_id;

            backdate_room(txn, &stale_room, 25).await?;
            backdate_room(txn, &fresh_room, 23).await?;

            let outcome = service.cleanup_inactive(txn, 24, 2).await?;
            assert_eq!(outcome.rooms, 1);

            assert!(service.game_info(txn, &stale_room).await.is_err());
            assert!(service.game_info(txn, &fresh_room).await.is_ok());

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn unseen_players_are_swept() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let host = unique_str("host");
            let room = service
                .create_room(txn, &host, "Host", None, RoomOptions::default())
                .await?
                .room_id;
            service.join_room(txn, &room, "idler", "Idler").await?;

            backdate_player(txn, &room, "idler", 3).await?;

            let outcome = service.cleanup_inactive(txn, 24, 2).await?;
            assert_eq!(outcome.players, 1);

            let info = service.game_info(txn, &room).await?;
            assert_eq!(info.player_count, 1);
            assert_eq!(info.players[0].id, host);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn thresholds_are_parameters_not_constants() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            let room = service
                .create_room(txn, &unique_str("host"), "Host", None, RoomOptions::default())
                .await?
                .room_id;

            backdate_room(txn, &room, 2).await?;

            // A 24h threshold spares it; a 1h threshold sweeps it.
            let spared = service.cleanup_inactive(txn, 24, 2).await?;
            assert_eq!(spared.rooms, 0);

            let swept = service.cleanup_inactive(txn, 1, 2).await?;
            assert_eq!(swept.rooms, 1);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}
