use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy for the browser clients.
///
/// `PARTY_CORS_ORIGIN` pins the allowed origin in production; without it the
/// policy stays permissive for local development.
pub fn cors_middleware() -> Cors {
    match std::env::var("PARTY_CORS_ORIGIN") {
        Ok(origin) if !origin.is_empty() => Cors::default()
            .allowed_origin(&origin)
            .allowed_methods(["GET", "POST", "PUT", "DELETE"])
            .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600),
        _ => Cors::permissive(),
    }
}
