use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use moodflow_core::auth::{hash_password, TokenIssuer};
use moodflow_core::storage::{SqliteStore, DEMO_USERNAME};
use moodflow_server::{app, init_tracing, AppState, Config};

const DEMO_PASSWORD: &str = "demo_password";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();
    init_tracing(&config);

    let store = SqliteStore::open(&config.database_path).with_context(|| {
        format!(
            "Failed to open database {}",
            config.database_path.display()
        )
    })?;
    tracing::info!(path = %config.database_path.display(), "database ready");

    if config.seed_demo {
        if let Some(user_id) = store.seed_demo_data(&hash_password(DEMO_PASSWORD)?)? {
            tracing::info!(%user_id, username = DEMO_USERNAME, "seeded demo account");
        }
    }

    let tokens = TokenIssuer::new(
        &config.token_secret,
        chrono::Duration::seconds(config.token_ttl_seconds),
    );
    let state = AppState::new(store, tokens, config.timezone);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    tracing::info!("listening on {}", listener.local_addr()?);
    tracing::info!("test endpoint: http://{}/api/test", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
