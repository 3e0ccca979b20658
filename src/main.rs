// news2tr - News snippet translator with provider fallback
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use news2tr::cli::Args;
use news2tr::config::AppConfig;
use news2tr::server::create_router;
use news2tr::translation::Translator;
use news2tr::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting news2tr v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the provider chain
    let translator = Translator::from_config(&config)?;
    let providers = translator.provider_names();
    if providers.is_empty() {
        warn!("No translation providers enabled, every request will pass through");
    } else {
        info!("Provider fallback order: {}", providers.join(" -> "));
    }
    if config.retry.enabled {
        info!(
            "Retrying provider calls up to {} times from {}ms",
            config.retry.max_attempts, config.retry.base_delay_ms
        );
    }

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, translator);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
