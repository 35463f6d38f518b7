use anyhow::Context;
use career_advisor::{app_state_from_config, build_app, config::AppConfig, init_tracing, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    if config.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; submissions will fail until it is configured");
    }
    tracing::info!(model = %config.model, timeout_ms = config.timeout_ms, "Loaded configuration");

    let app = build_app(app_state_from_config(&config));
    run_server(app, config.port)
        .await
        .context("server terminated with an error")
}
