//! HTTP surface: JSON shapes, status codes, problem+json error documents.

use actix_web::{test, web, App};
use backend::config::db::DbKind;
use backend::infra::state::build_state;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::AppError;
use serde_json::json;

async fn build_http_state() -> Result<AppState, AppError> {
    backend_test_support::test_logging::init();
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::new("sweep-secret"))
        .build()
        .await
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_join_and_poll_a_room() {
    let state = build_http_state().await.expect("state");
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/party/rooms")
        .set_json(json!({
            "hostId": "host-1",
            "hostName": "Alice",
            "targetColor": "#aabbcc",
            "maxPlayers": 2,
            "maxRounds": 2
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 201);
    let body: serde_json::Value = test::read_body_json(res).await;
    let room_code = body["roomId"].as_str().expect("roomId").to_string();
    assert_eq!(body["gameInfo"]["gameState"], "lobby");
    assert_eq!(body["gameInfo"]["maxPlayers"], 2);

    let req = test::TestRequest::post()
        .uri(&format!("/api/party/rooms/{room_code}/players"))
        .set_json(json!({"playerId": "bob", "playerName": "Bob"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/party/rooms/{room_code}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let info: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(info["playerCount"], 2);
    assert_eq!(info["minPlayers"], 2);
    assert_eq!(info["players"][1]["name"], "Bob");
}

#[actix_web::test]
async fn unknown_room_renders_problem_json() {
    let state = build_http_state().await.expect("state");
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/party/rooms/NOSUCH")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
    assert_eq!(
        res.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    assert!(res.headers().contains_key("x-request-id"));

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "ROOM_NOT_FOUND");
    assert_eq!(body["status"], 404);
    assert!(body["trace_id"].as_str().is_some());
}

#[actix_web::test]
async fn full_room_join_is_a_bad_request() {
    let state = build_http_state().await.expect("state");
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/party/rooms")
        .set_json(json!({"hostId": "h", "hostName": "Host", "maxPlayers": 2}))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let room_code = body["roomId"].as_str().expect("roomId").to_string();

    for (id, name) in [("p1", "One"), ("p2", "Two")] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/party/rooms/{room_code}/players"))
            .set_json(json!({"playerId": id, "playerName": name}))
            .to_request();
        let res = test::call_service(&app, req).await;
        if id == "p1" {
            assert_eq!(res.status(), 200);
        } else {
            assert_eq!(res.status(), 400);
            let body: serde_json::Value = test::read_body_json(res).await;
            assert_eq!(body["code"], "ROOM_FULL");
        }
    }
}

#[actix_web::test]
async fn round_and_score_routes_drive_a_session() {
    let state = build_http_state().await.expect("state");
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/party/rooms")
        .set_json(json!({"hostId": "h", "hostName": "Host", "maxRounds": 1}))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let room_code = body["roomId"].as_str().expect("roomId").to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/party/rooms/{room_code}/rounds"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 201);
    let info: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(info["gameState"], "playing");
    assert_eq!(info["currentRound"], 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/party/rooms/{room_code}/scores"))
        .set_json(json!({
            "playerId": "h",
            "playerName": "Host",
            "score": 88,
            "timeTaken": 3.25,
            "similarity": 91.5
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let req = test::TestRequest::post()
        .uri(&format!("/api/party/rooms/{room_code}/rounds/end"))
        .to_request();
    let info: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(info["gameState"], "sessionFinished");

    let req = test::TestRequest::get()
        .uri(&format!("/api/party/rooms/{room_code}/leaderboard"))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["leaderboard"][0]["rank"], 1);
    assert_eq!(body["leaderboard"][0]["id"], "h");
    assert_eq!(body["leaderboard"][0]["averageScore"], 88.0);
}

#[actix_web::test]
async fn cleanup_requires_the_admin_token() {
    let state = build_http_state().await.expect("state");
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/party/cleanup")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/party/cleanup")
        .insert_header(("x-admin-token", "sweep-secret"))
        .set_json(json!({"roomHours": 24, "playerHours": 2}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["cleaned"]["rooms"], 0);
    assert_eq!(body["cleaned"]["players"], 0);
}

#[actix_web::test]
async fn health_reports_db_and_migrations() {
    let state = build_http_state().await.expect("state");
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body["migrations"].as_str().is_some());
}
