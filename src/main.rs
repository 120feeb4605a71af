mod app;
mod auth;
mod clock;
mod config;
mod db;
mod error;
mod extract;
mod leads;
#[cfg(test)]
mod memory;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "leadcapture=debug,axum=info,tower_http=info".to_string());
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

    let app_state = state::AppState::init().await?;
    tracing::info!(
        production = app_state.config.production,
        token_ttl_secs = app_state.config.jwt.expires_in.whole_seconds(),
        "configuration loaded"
    );

    app::serve(app::build_app(app_state)).await
}
