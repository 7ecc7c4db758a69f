use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use hrdesk_core::tracing::init_tracing;
use hrdesk_hr::config::HrConfig;
use hrdesk_hr::router::build_router;
use hrdesk_hr::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = HrConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        work_timezone: config.work_timezone,
        teams: Arc::new(config.team_titles),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.hr_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(work_timezone = %config.work_timezone, "hr service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
