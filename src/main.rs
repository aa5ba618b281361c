use actix_web::{web, App, HttpServer};
use log::info;

mod config;
mod error;
mod game;
mod matchmaker;
mod models;
mod routes;
mod websocket;

use config::Config;
use models::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;
    let bind = config.bind.clone();
    let static_dir = config.static_dir.clone();

    info!(
        "Starting Stacked Fourside server at http://{} ({}x{} board, {} to win)",
        bind, config.board_size, config.board_size, config.win_length
    );

    let app_state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(|cfg| routes::configure_routes(cfg, &static_dir))
    })
    .bind(bind)?
    .run()
    .await
}
