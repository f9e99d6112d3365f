//! Room lifecycle and session orchestration routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::entities::party_rooms::GameKind;
use crate::error::AppError;
use crate::services::party::{GameInfo, PartyService, RoomOptions};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoomRequest {
    host_id: String,
    host_name: String,
    target_color: Option<String>,
    max_players: Option<i32>,
    max_rounds: Option<i32>,
    guess_time: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoomResponse {
    room_id: String,
    game_info: GameInfo,
}

/// POST /api/party/rooms
async fn create_room(
    http_req: HttpRequest,
    body: web::Json<CreateRoomRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service
                .create_room(
                    txn,
                    &body.host_id,
                    &body.host_name,
                    body.target_color.as_deref(),
                    RoomOptions {
                        max_players: body.max_players,
                        max_rounds: body.max_rounds,
                        guess_time: body.guess_time,
                    },
                )
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CreateRoomResponse {
        room_id: game_info.room_id.clone(),
        game_info,
    }))
}

/// GET /api/party/rooms/{room_code}
async fn get_room(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.game_info(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

/// DELETE /api/party/rooms/{room_code}
async fn deactivate_room(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.deactivate_room(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectGameTypeRequest {
    game_type: GameKind,
}

/// POST /api/party/rooms/{room_code}/game-type
async fn select_game_type(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<SelectGameTypeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();
    let game_type = body.into_inner().game_type;

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.select_game_type(txn, &room_code, game_type).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetTargetColorRequest {
    target_color: String,
}

/// POST /api/party/rooms/{room_code}/target-color
async fn set_target_color(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<SetTargetColorRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();
    let target_color = body.into_inner().target_color;

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.set_target_color(txn, &room_code, &target_color).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtendTimeRequest {
    seconds: Option<i32>,
}

/// POST /api/party/rooms/{room_code}/extend-time
async fn extend_time(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<ExtendTimeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();
    let seconds = body.into_inner().seconds.unwrap_or(30);

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.extend_time(txn, &room_code, seconds).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

/// POST /api/party/rooms/{room_code}/continue
async fn continue_session(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.continue_session(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

/// POST /api/party/rooms/{room_code}/end
async fn end_session(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.end_session(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_room)),
    );
    cfg.service(
        web::resource("/{room_code}")
            .route(web::get().to(get_room))
            .route(web::delete().to(deactivate_room)),
    );
    cfg.service(
        web::resource("/{room_code}/game-type").route(web::post().to(select_game_type)),
    );
    cfg.service(
        web::resource("/{room_code}/target-color").route(web::post().to(set_target_color)),
    );
    cfg.service(web::resource("/{room_code}/extend-time").route(web::post().to(extend_time)));
    cfg.service(web::resource("/{room_code}/continue").route(web::post().to(continue_session)));
    cfg.service(web::resource("/{room_code}/end").route(web::post().to(end_session)));
}
