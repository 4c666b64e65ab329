use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tickerhub_aggregator::{OutboundNotifier, SnapshotBuilder, SnapshotCache};
use tickerhub_clock::SystemClock;
use tickerhub_gateway::AdapterRegistry;
use tickerhub_server::{AppState, Settings, create_router, telemetry};

fn print_help() {
    eprintln!(
        r#"Tickerhub - multi-exchange market snapshot service

USAGE:
    tickerhub [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES (a .env file is read when present):
    HOST, PORT                          Bind address (default: 0.0.0.0:8000)
    <EXCHANGE>_BASE_URL                 Upstream base URL per exchange
    REQUEST_TIMEOUT_SECONDS             Upstream request timeout (default: 20)
    KRAKEN_TICKER_BATCH_SIZE            Pairs per Kraken ticker call (default: 40)
    COINBASE_TICKER_CONCURRENCY         Parallel Coinbase ticker calls (default: 15)
    SNAPSHOT_CACHE_TTL_SECONDS          Fresh window (default: 20)
    SNAPSHOT_CACHE_SWR_SECONDS          Stale-while-revalidate window (default: 120)
    DEFAULT_QUOTE_ASSET                 Quote filter when a request sets none
    DEFAULT_MAX_PAIRS                   Pair limit when a request sets none
    DEFAULT_TOP_ASSETS_ONLY             Allow-list filter default (default: true)
    INCOMING_WEBHOOK_TOKEN              Required x-webhook-token for POST /webhooks
    OUTBOUND_WEBHOOK_URL                Enables the periodic snapshot push
    OUTBOUND_EXCHANGE                   Exchange pushed (default: binance)
    OUTBOUND_WEBHOOK_TIMEOUT_SECONDS    Push timeout (default: 15)
    POLL_INTERVAL_SECONDS               Push interval (default: 30)
    LOG_FORMAT                          text or json (default: text)
    RUST_LOG                            Log level filter

EXAMPLES:
    # Run with defaults
    tickerhub

    # Run with config file
    tickerhub --config tickerhub.json

    # Run with custom port
    PORT=9000 tickerhub
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                };
                config_path = Some(PathBuf::from(path));
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let settings = Settings::load(config_path.as_deref()).context("invalid configuration")?;
    telemetry::init_tracing(settings.log_format);

    if let Some(path) = &config_path {
        tracing::info!(path = %path.display(), "configuration file loaded");
    }
    tracing::info!(
        ttl_secs = settings.snapshot_cache_ttl_seconds,
        swr_secs = settings.snapshot_cache_swr_seconds,
        top_assets_only = settings.default_top_assets_only,
        webhook_auth = settings.incoming_webhook_token.is_some(),
        "configuration"
    );

    // Wire components
    let clock = Arc::new(SystemClock);
    let registry = AdapterRegistry::from_config(&settings.gateway_config())
        .context("failed to build HTTP client")?;
    let builder = Arc::new(SnapshotBuilder::new(
        registry,
        settings.snapshot_defaults(),
        clock.clone(),
    ));
    let cache = SnapshotCache::new(builder.clone(), settings.cache_config());

    let notifier = match settings.notifier_config() {
        Some(config) => {
            let notifier = OutboundNotifier::new(builder, config)
                .context("failed to build outbound notifier")?;
            Some(notifier.spawn())
        }
        None => {
            tracing::info!("outbound notifier disabled");
            None
        }
    };

    let state = Arc::new(AppState::new(
        clock,
        cache,
        settings.incoming_webhook_token.clone(),
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", settings.host, settings.port))?;
    tracing::info!("Starting tickerhub on http://{}", listener.local_addr()?);
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /exchanges");
    tracing::info!("  GET  /markets/{{exchange}}?quote_asset=USDT&max_pairs=50&top_assets_only=true");
    tracing::info!("  POST /webhooks/{{exchange}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = notifier {
        handle.abort();
    }
    tracing::info!("tickerhub stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
