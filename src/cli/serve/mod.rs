//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::create_router;
use crate::config::{AppConfig, ProviderEnvironment};
use crate::infrastructure::logging;

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind, overriding `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding `server.port`
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, &args);
    logging::init_logging(&config.logging)?;

    let state = crate::create_app_state(&config, ProviderEnvironment::from_process())?;
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting briefing gateway on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
