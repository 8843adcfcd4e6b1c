//! Tracing setup and server startup.

use std::sync::Arc;

use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use propsearch_api::{ApiConfig, ApiServer, AppState};
use propsearch_config::{Config, LoggingConfig};

use crate::register::build_engine;

/// Initialize tracing with console and optional rotating file output.
///
/// `RUST_LOG` takes precedence over the configured level.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if logging.file {
        std::fs::create_dir_all(&logging.dir)?;
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("propsearch")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&logging.dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Flushes buffered lines on drop; must outlive the subscriber.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Run the HTTP server in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting propsearch v{}", env!("CARGO_PKG_VERSION"));

    let (engine, _store) = build_engine(&config).await?;
    let state = Arc::new(AppState::new(Arc::new(engine)));

    let api_config = ApiConfig::new(config.server.host.clone(), config.server.port);
    ApiServer::new(api_config, state).run().await
}
