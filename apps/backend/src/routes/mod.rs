use actix_web::web;

pub mod cleanup;
pub mod health;
pub mod players;
pub mod rooms;
pub mod rounds;
pub mod scores;

/// Configure application routes for both the server and test harnesses.
///
/// Room-scoped resources nest under `/api/party/rooms`; the cleanup sweep
/// and health probe live beside them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api/party/rooms")
            .configure(rooms::configure_routes)
            .configure(players::configure_routes)
            .configure(rounds::configure_routes)
            .configure(scores::configure_routes),
    );

    cfg.service(web::scope("/api/party/cleanup").configure(cleanup::configure_routes));
}
