mod app;
mod auth;
mod config;
mod content;
mod db;
mod error;
mod extract;
mod reviews;
mod state;
mod wishlist;

#[cfg(test)]
mod testing;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "reelreview=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let http = config.http.clone();
    tracing::info!(
        cors_origin = http.cors_origin.as_deref().unwrap_or("*"),
        "configuration loaded"
    );

    let state = AppState::init(config).await?;
    app::serve(app::build_app(state), &http).await
}
