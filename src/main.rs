use clap::Parser;
use docspeak::cli::{self, Cli};
use docspeak::domain::conversion::ConversionService;
use docspeak::infrastructure::audio::{AudioPlayer, ExternalPlayer};
use docspeak::infrastructure::backend::BackendClient;
use docspeak::infrastructure::config::{Config, LogFormat};
use docspeak::infrastructure::http::build_http_client;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    config.apply_server_override(cli.server.as_deref());

    // Initialize logging
    init_logging(&config, cli.verbose);

    tracing::debug!(
        backend_url = %config.backend_url,
        bucket_url = %config.bucket_url,
        "Configuration loaded"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Shared HTTP client with the configured timeout
    let http_client = build_http_client(&config)?;

    // 2. Gateway to the conversion backend
    let backend = Arc::new(BackendClient::new(config.backend_url.clone(), http_client));

    // 3. Audio player resolved from preference and PATH
    let player: Arc<dyn AudioPlayer> =
        Arc::new(ExternalPlayer::detect(config.audio_player.as_deref()));

    // 4. Conversion service (inject gateway and player)
    let service = Arc::new(ConversionService::new(
        backend,
        player,
        config.bucket_url.clone(),
        config.output_dir.clone(),
        config.poll_attempts,
        config.poll_interval(),
        config.presence_cache_enabled,
    ));

    if let Err(err) = cli::run(cli.command, service, &config).await {
        tracing::error!(error = %err, "Command failed");
        eprintln!("❌ {}", err);
        std::process::exit(err.exit_code());
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool) {
    let default_filter = if verbose { "docspeak=debug" } else { "docspeak=info" };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
