use std::sync::Arc;

use roomgen::{logger, server, Config, GatewayClient, RoomAnalyzer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    if dotenv_loaded {
        log::info!(".env file loaded");
    } else {
        log::debug!("No .env file found, using process environment");
    }

    let config = Config::from_env();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);

    let gateway = GatewayClient::new(&config.gateway).map_err(|e| {
        log::error!("Failed to initialize gateway client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let analyzer = RoomAnalyzer::new(
        Arc::new(gateway.vision().clone()),
        Arc::new(gateway.image().clone()),
    )
    .with_max_image_bytes(config.max_image_bytes);

    server::run(&config, analyzer).await
}
