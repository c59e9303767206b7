// ABOUTME: Server binary that loads configuration, opens the database and serves the HTTP API
// ABOUTME: Shuts down gracefully on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Liftlog Server Binary
//!
//! Starts the Liftlog HTTP API with user authentication and a `SQLite` store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use liftlog_server::auth::AuthManager;
use liftlog_server::config::environment::ServerConfig;
use liftlog_server::config::DatabaseUrl;
use liftlog_server::database::Database;
use liftlog_server::errors::set_expose_internal_details;
use liftlog_server::logging;
use liftlog_server::resources::ServerResources;
use liftlog_server::routes::build_router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "liftlog-server")]
#[command(about = "Liftlog - workout program scheduling and set logging API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override `DATABASE_URL`
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(url)?;
    }

    set_expose_internal_details(config.exposes_error_details());
    info!("Starting Liftlog server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;

    if config.auth.jwt_secret.is_none() {
        warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
    }
    let auth_manager = AuthManager::from_config(&config.auth);

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let app = build_router(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => warn!("Failed to listen for SIGTERM: {e}"),
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
