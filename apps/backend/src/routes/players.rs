//! Player membership routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::players::Player;
use crate::services::party::{millis, PartyService};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    id: String,
    name: String,
    score: i32,
    attempts: i32,
    best_score: i32,
    session_score: f64,
    round_scores: Vec<i32>,
    joined_at: i64,
    last_seen: i64,
}

impl From<Player> for PlayerResponse {
    fn from(p: Player) -> Self {
        Self {
            id: p.player_id,
            name: p.player_name,
            score: p.score,
            attempts: p.attempts,
            best_score: p.best_score,
            session_score: p.session_score,
            round_scores: p.round_scores,
            joined_at: millis(p.joined_at),
            last_seen: millis(p.last_seen),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest {
    player_id: String,
    player_name: String,
}

/// POST /api/party/rooms/{room_code}/players
async fn join_room(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();
    let body = body.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service
                .join_room(txn, &room_code, &body.player_id, &body.player_name)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

#[derive(Debug, Serialize)]
struct PlayersResponse {
    players: Vec<PlayerResponse>,
}

/// GET /api/party/rooms/{room_code}/players
async fn list_players(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let players = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.list_players(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayersResponse {
        players: players.into_iter().map(PlayerResponse::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePlayerRequest {
    player_name: Option<String>,
}

/// PUT /api/party/rooms/{room_code}/players/{player_id}
///
/// Doubles as the liveness heartbeat: an empty body still refreshes
/// last_seen.
async fn update_player(
    http_req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Json<UpdatePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (room_code, player_id) = path.into_inner();
    let player_name = body.into_inner().player_name;

    let player = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service
                .update_player(txn, &room_code, &player_id, player_name)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayerResponse::from(player)))
}

/// DELETE /api/party/rooms/{room_code}/players/{player_id}
///
/// Returns the post-leave GameInfo, or 204 when the room was torn down
/// because the last player left.
async fn leave_room(
    http_req: HttpRequest,
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (room_code, player_id) = path.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.leave_room(txn, &room_code, &player_id).await
        })
    })
    .await?;

    match game_info {
        Some(info) => Ok(HttpResponse::Ok().json(info)),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{room_code}/players")
            .route(web::post().to(join_room))
            .route(web::get().to(list_players)),
    );
    cfg.service(
        web::resource("/{room_code}/players/{player_id}")
            .route(web::put().to(update_player))
            .route(web::delete().to(leave_room)),
    );
}
