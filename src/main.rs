#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up APP_ENV, SMOKE_PORT, etc.
    let _ = dotenvy::dotenv();

    let config = status_smoke::config::config();
    status_smoke::logging::init(config);
    tracing::info!("Starting status server in {:?} mode", config.environment);

    status_smoke::app::serve(config).await
}
