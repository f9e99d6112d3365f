//! Periodic cleanup sweep, triggered externally (cron hitting this route).

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::services::party::{CleanupOutcome, PartyService};
use crate::state::app_state::AppState;

const DEFAULT_ROOM_HOURS: i64 = 24;
const DEFAULT_PLAYER_HOURS: i64 = 2;

fn check_admin_token(req: &HttpRequest, app_state: &AppState) -> Result<(), AppError> {
    let presented = req
        .headers()
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok());
    if !app_state.security.admin_token_matches(presented) {
        return Err(AppError::unauthorized());
    }
    Ok(())
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CleanupRequest {
    room_hours: Option<i64>,
    player_hours: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CleanupResponse {
    cleaned: CleanupOutcome,
    message: String,
}

/// POST /api/party/cleanup
async fn run_cleanup(
    http_req: HttpRequest,
    body: Option<web::Json<CleanupRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    check_admin_token(&http_req, &app_state)?;

    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let room_hours = body.room_hours.unwrap_or(DEFAULT_ROOM_HOURS);
    let player_hours = body.player_hours.unwrap_or(DEFAULT_PLAYER_HOURS);

    let cleaned = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PartyService::new();
            service.cleanup_inactive(txn, room_hours, player_hours).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CleanupResponse {
        message: format!(
            "Cleaned up {} inactive rooms and {} inactive players",
            cleaned.rooms, cleaned.players
        ),
        cleaned,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CleanupCutoffs {
    rooms: String,
    players: String,
}

#[derive(Debug, Serialize)]
struct CleanupDryRunResponse {
    cutoffs: CleanupCutoffs,
    message: String,
}

/// GET /api/party/cleanup - dry run; reports the cutoffs a sweep would use.
async fn cleanup_info(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    check_admin_token(&http_req, &app_state)?;

    let now = OffsetDateTime::now_utc();
    let fmt = &time::format_description::well_known::Rfc3339;
    let room_cutoff = (now - Duration::hours(DEFAULT_ROOM_HOURS))
        .format(fmt)
        .unwrap_or_else(|_| "unknown".to_string());
    let player_cutoff = (now - Duration::hours(DEFAULT_PLAYER_HOURS))
        .format(fmt)
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(HttpResponse::Ok().json(CleanupDryRunResponse {
        cutoffs: CleanupCutoffs {
            rooms: room_cutoff,
            players: player_cutoff,
        },
        message: "Use POST to perform actual cleanup".to_string(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(run_cleanup))
            .route(web::get().to(cleanup_info)),
    );
}
