use clap::Parser;
use highlights::config::{Cli, Config, default_config_path};
use highlights::handler::AppState;
use highlights::model::seed_highlights;
use highlights::routes;
use highlights::store::{HighlightStore, IdPolicy};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("highlights.svc starting");

    let config_path = args
        .config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(default_config_path);

    let mut cfg = Config::load_or_default(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });
    if let Some(port) = args.port {
        cfg.app.set_port(port);
    }

    if cfg.app.id_policy == IdPolicy::Length {
        tracing::warn!("id_policy=length can hand out an id that is already in use after a delete");
    }

    let seed = if cfg.app.seed { seed_highlights() } else { Vec::new() };
    let store = HighlightStore::new(seed, cfg.app.id_policy);
    let app = routes::app(AppState::new(store));

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    let cancellation_token = CancellationToken::new();
    let shutdown_token = cancellation_token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl+c signal received, preparing to shutdown");
        }
        shutdown_token.cancel();
    });

    tracing::info!("highlights.svc running on {}", &address);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await;

    if let Err(err) = result {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }

    tracing::info!("highlights.svc going off, graceful shutdown complete");
}
