use thought_translator::{actuators::translate::back, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG from it reaches the subscriber
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(config::LOG_FILTER_VAR))
        .init();

    let config = config::validate()?;

    back::serve(config).await
}
