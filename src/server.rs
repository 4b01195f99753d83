use actix_cors::Cors;
use actix_web::{
    http::{header, Method},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use serde_json::json;

use crate::{
    analyzer::RoomAnalyzer,
    config::Config,
    error::{Result, RoomGenError},
    models::AnalyzeRoomRequest,
};

/// Any origin, plus the headers browser clients attach to function calls.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec![Method::POST, Method::GET, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-client-info"),
            header::HeaderName::from_static("apikey"),
        ])
        .max_age(3600)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze-room", web::post().to(analyze_room))
        .route("/health", web::get().to(health));
}

/// Largest request body `analyze_room` will buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        BodyLimit(Config::new().payload_limit())
    }
}

/// The body is read and decoded by hand so an oversize or malformed payload
/// gets the same `{ "error": ... }` 500 as every other failure instead of
/// actix's plain-text 413 or 400.
pub async fn analyze_room(
    req: HttpRequest,
    payload: web::Payload,
    analyzer: web::Data<RoomAnalyzer>,
) -> Result<HttpResponse> {
    let limit = req.app_data::<BodyLimit>().copied().unwrap_or_default().0;
    let body = match payload.to_bytes_limited(limit).await {
        Ok(body) => body
            .map_err(|e| RoomGenError::input(format!("Invalid request body: {}", e)))?,
        Err(_) => {
            log::warn!("Rejected request body over {} bytes", limit);
            return Err(RoomGenError::input(format!(
                "Image is too large (request body limit is {} bytes)",
                limit
            )));
        }
    };

    let request: AnalyzeRoomRequest = serde_json::from_slice(&body)
        .map_err(|e| RoomGenError::input(format!("Invalid request body: {}", e)))?;

    let response = analyzer.analyze(&request).await?;
    if response.is_degraded() {
        log::warn!("Responding with analysis but no redesign image");
    }

    Ok(HttpResponse::Ok().json(response))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn run(config: &Config, analyzer: RoomAnalyzer) -> std::io::Result<()> {
    let analyzer = web::Data::new(analyzer);
    let body_limit = BodyLimit(config.payload_limit());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(analyzer.clone())
            .app_data(body_limit)
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
