use dotenv::dotenv;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::FmtSubscriber;

use crate::{config::config::CONFIG, server::app_state::AppState, server::router::build_router};

mod auth;
mod config;
mod dataset;
mod health;
mod mw;
mod quiz;
mod report;
mod server;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() {
    // Initialize .env
    dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing");

    // Initialize state, a failed dataset fetch aborts startup
    let state = AppState::from_config(&CONFIG)
        .await
        .unwrap_or_else(|e| panic!("{}", e));

    info!("Serving quiz over {} countries", state.get_dataset().len());

    // Initialize routes
    let app = build_router(state);

    // Initialize webserver
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", CONFIG.server.address, CONFIG.server.port))
            .await
            .unwrap_or_else(|e| panic!("Failed to bind listener: {}", e));

    info!(
        "Server listening on address: {}:{}",
        CONFIG.server.address, CONFIG.server.port
    );

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("Server stopped: {}", e));
}
