//! Score submission and leaderboard routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::entities::party_rooms::GameKind;
use crate::error::AppError;
use crate::repos::scores::Score;
use crate::services::party::{millis, PartyService, SubmitScore};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitScoreRequest {
    player_id: String,
    player_name: String,
    score: i32,
    time_taken: f64,
    captured_color: Option<String>,
    similarity: Option<f64>,
}

/// POST /api/party/rooms/{room_code}/scores
async fn submit_score(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<SubmitScoreRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();
    let body = body.into_inner();

    let game_info = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service
                .submit_score(
                    txn,
                    &room_code,
                    SubmitScore {
                        player_id: body.player_id,
                        player_name: body.player_name,
                        score: body.score,
                        time_taken: body.time_taken,
                        captured_color: body.captured_color,
                        similarity: body.similarity,
                    },
                )
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(game_info))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreResponse {
    round_id: i64,
    player_id: String,
    player_name: String,
    score: i32,
    time_taken: f64,
    target_color: String,
    captured_color: Option<String>,
    similarity: Option<f64>,
    game_type: GameKind,
    submitted_at: i64,
}

impl From<Score> for ScoreResponse {
    fn from(s: Score) -> Self {
        Self {
            round_id: s.round_id,
            player_id: s.player_id,
            player_name: s.player_name,
            score: s.score,
            time_taken: s.time_taken,
            target_color: s.target_color,
            captured_color: s.captured_color,
            similarity: s.similarity,
            game_type: s.game_type,
            submitted_at: millis(s.submitted_at),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListScoresQuery {
    round: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ScoresResponse {
    scores: Vec<ScoreResponse>,
}

/// GET /api/party/rooms/{room_code}/scores[?round=N]
async fn list_scores(
    http_req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ListScoresQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();
    let round_no = query.into_inner().round;

    let scores = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.list_scores(txn, &room_code, round_no).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ScoresResponse {
        scores: scores.into_iter().map(ScoreResponse::from).collect(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardEntryResponse {
    rank: usize,
    id: String,
    name: String,
    session_score: f64,
    round_scores: Vec<i32>,
    total_score: i32,
    average_score: f64,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    leaderboard: Vec<LeaderboardEntryResponse>,
}

/// GET /api/party/rooms/{room_code}/leaderboard
async fn leaderboard(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room_code = path.into_inner();

    let entries = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.leaderboard(txn, &room_code).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(LeaderboardResponse {
        leaderboard: entries
            .into_iter()
            .enumerate()
            .map(|(idx, e)| LeaderboardEntryResponse {
                rank: idx + 1,
                id: e.player_id,
                name: e.player_name,
                session_score: e.session_score,
                round_scores: e.round_scores,
                total_score: e.total_score,
                average_score: e.average_score,
            })
            .collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{room_code}/scores")
            .route(web::post().to(submit_score))
            .route(web::get().to(list_scores)),
    );
    cfg.service(web::resource("/{room_code}/leaderboard").route(web::get().to(leaderboard)));
}
