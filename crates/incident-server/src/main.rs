use clap::Parser;
use std::io;

use incident_server::logging::init_logging;
use incident_server::{run_server, ServerConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    if config.log_level.is_some() {
        // If RUST_LOG is set, use it
        env_logger::init();
    } else {
        init_logging(config.debug);
    }

    log::info!("Starting incident helper server on port {}", config.port);
    log::info!("Model configuration:");
    log::info!("  Provider: {}", config.provider.as_str());
    log::info!("  Region: {}", config.region);
    log::info!("  Model: {}", config.model_id);
    if let Some(endpoint) = &config.endpoint {
        log::info!("  Endpoint: {}", endpoint);
    }

    if config.debug {
        log::debug!("Debug mode enabled");
        log::debug!("  Max tokens: {}", config.max_tokens);
        log::debug!("  Temperature: {}", config.temperature);
        log::debug!("  Timeout: {}s", config.timeout_secs);
        log::debug!("  Fixes headers: {:?}", config.fixes_headers);
    }

    run_server(config).await
}
