//! SecureTag verification server

use anyhow::{Context, Result};
use clap::Parser;
use securetag_core::TagKind;
use securetag_server::{build_service, logging, router, AppState, Environment, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "securetag-server")]
#[command(about = "SecureTag - QR and NFC badge verification service", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Listen port; overrides the port of the bind address
    #[arg(short, long)]
    port: Option<u16>,

    /// Deployment environment (development | production)
    #[arg(long)]
    environment: Option<Environment>,

    /// Audit log capacity
    #[arg(long)]
    audit_capacity: Option<usize>,

    /// Start with an empty registry instead of the demo records
    #[arg(long)]
    no_demo_records: bool,
}

impl Cli {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(port) = self.port {
            config.bind.set_port(port);
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if let Some(capacity) = self.audit_capacity {
            config.audit_capacity = capacity;
        }
        if self.no_demo_records {
            config.seed_demo_records = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut config = ServerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);
    config.validate().context("validating configuration")?;

    let service = build_service(&config)
        .await
        .context("initialising tag registry")?;
    let started_at = service.now().await;

    let bind = config.bind;
    let environment = config.environment;
    let state = AppState::new(service.clone(), config, started_at);
    let app = router(state);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!(%bind, %environment, "SecureTag server listening");
    info!("Health check: http://{bind}/api/health");

    for record in service.records(TagKind::Qr).await? {
        info!("Sample QR code: {} ({})", record.id, record.name);
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("serving HTTP")?;

    info!("SecureTag server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
