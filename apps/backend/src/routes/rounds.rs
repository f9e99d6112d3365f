//! Round lifecycle routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Serialize;

use crate::db::txn::with_txn;
use crate::entities::party_rooms::GameKind;
use crate::error::AppError;
use crate::repos::rounds::{Round, RoundResult};
use crate::services::party::{millis, PartyService};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundResponse {
    round: i32,
    game_type: GameKind,
    denner_id: String,
    denner_name: String,
    target_color: String,
    guess_time: i32,
    start_time: i64,
    end_time: Option<i64>,
    is_completed: bool,
    player_results: Vec<RoundResult>,
}

impl From<Round> for RoundResponse {
    fn from(r: Round) -> Self {
        Self {
            round: r.round_no,
            game_type: r.game_type,
            denner_id: r.denner_id,
            denner_name: r.denner_name,
            target_color: r.target_color,
            guess_time: r.guess_time,
            start_time: millis(r.started_at),
            end_time: r.ended_at.map(millis),
            is_completed: r.is_completed,
            player_results: r.player_results,
        }
    }
}

/// POST /api/party/rooms/{room_code}/rounds
async fn start_round(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.start_round(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(game_info))
}

/// POST /api/party/rooms/{room_code}/rounds/end
async fn end_round(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.end_round(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

#[derive(Debug, Serialize)]
struct RoundsResponse {
    rounds: Vec<RoundResponse>,
}

/// GET /api/party/rooms/{room_code}/rounds
async fn list_rounds(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let rounds = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.list_rounds(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RoundsResponse {
        rounds: rounds.into_iter().map(RoundResponse::from).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{room_code}/rounds")
            .route(web::post().to(start_round))
            .route(web::get().to(list_rounds)),
    );
    cfg.service(web::resource("/{room_code}/rounds/end").route(web::post().to(end_round)));
}
