pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod prompt;

use std::sync::Arc;

use axum::Router;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::completion::{CompletionService, OpenAiCompletion};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionService>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    pub strict_status: bool,
}

impl AppState {
    /// State with generation settings taken from `config` and an explicit
    /// completion backend.
    pub fn new(config: &AppConfig, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_ms: config.timeout_ms,
            strict_status: config.strict_status,
        }
    }
}

pub fn app_state_from_config(config: &AppConfig) -> Arc<AppState> {
    let completion = OpenAiCompletion::new(&config.base_url, &config.api_key);
    Arc::new(AppState::new(config, Arc::new(completion)))
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .init();
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Career advisor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
