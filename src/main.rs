mod app;
mod auth;
mod clients;
mod config;
mod preferences;
mod schedules;
mod scheduler;
mod speeches;
mod state;
mod storage;
#[cfg(test)]
mod testing;
mod users;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "orator=debug,axum=info,tower_http=info".to_string());
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

    let app_state = AppState::init().await?;

    sqlx::migrate!("./migrations").run(&app_state.db).await?;

    if app_state.config.scheduler.enabled {
        tokio::spawn(scheduler::runner::run(app_state.clone()));
    } else {
        tracing::info!("delivery scheduler disabled, serving API only");
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
