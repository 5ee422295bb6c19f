use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::post().to(handlers::analyze::handler))
        .route("/analyze", web::post().to(handlers::analyze::handler))
        .route("/health", web::get().to(handlers::health::handler));
}

pub fn mock_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/mock").route("/analyze", web::post().to(handlers::mock::handler)));
}

pub async fn run_server(config: ServerConfig) -> io::Result<()> {
    log::info!(
        "Initializing server with provider: {}, model: {}",
        config.provider.as_str(),
        config.model_id
    );

    let state = AppState::from_config(&config).map_err(|e| {
        log::error!("Failed to create model invoker: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    let state = web::Data::new(state);

    let mock_routes = config.mock_routes;
    let max_body_bytes = config.max_body_bytes;
    if mock_routes {
        log::info!("Mock routes enabled under /mock");
    }

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(app_config)
            .configure(|cfg| {
                if mock_routes {
                    mock_config(cfg);
                }
            })
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    log::info!("Listening on http://{}:{}", config.bind_addr, config.port);
    server
        .bind((config.bind_addr.as_str(), config.port))?
        .run()
        .await
}
