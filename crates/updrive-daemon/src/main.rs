//! updrive Daemon - Background mirroring service
//!
//! This binary runs the one-way mirror loop:
//! - Loads startup configuration from the environment (fatal on error)
//! - Periodically runs one reconciliation pass
//! - Isolates pass-level failures so the process keeps running
//! - Shuts down gracefully on SIGTERM/SIGINT
//!
//! # Architecture
//!
//! The daemon wires the Disk client into the sync engine and enters a main
//! loop driven by `tokio::time::interval`. The loop is controlled by a
//! `CancellationToken` that is triggered on receipt of SIGTERM or SIGINT;
//! cancellation is observed between passes, never mid-operation, so a pass
//! always completes or fails as a unit.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use updrive_core::config::Config;
use updrive_disk::{client::DiskClient, provider::DiskRemoteStorage};
use updrive_sync::engine::SyncEngine;

// ============================================================================
// MirrorService
// ============================================================================

/// Main daemon service owning the engine and the shutdown token
struct MirrorService {
    /// Startup configuration from the environment
    config: Config,
    /// The reconciliation engine
    engine: SyncEngine,
    /// Token for signalling graceful shutdown
    shutdown: CancellationToken,
}

impl MirrorService {
    /// Wires the Disk client, storage adapter, and engine from configuration
    fn new(config: Config, shutdown: CancellationToken) -> Self {
        let client = DiskClient::new(config.token.clone(), config.remote_dir.clone());
        let remote = Arc::new(DiskRemoteStorage::new(client));
        let engine = SyncEngine::new(remote);

        Self {
            config,
            engine,
            shutdown,
        }
    }

    /// Main mirroring loop with periodic polling
    ///
    /// Each tick runs one reconciliation pass. A pass-level failure is
    /// logged with its semantic kind and the loop continues to the next
    /// interval; this is the only layer that catches pass errors.
    async fn run(&self) -> Result<()> {
        let poll_secs = self.config.poll_interval;

        info!(
            poll_interval_secs = poll_secs,
            local_dir = %self.config.local_dir.display(),
            remote_dir = %self.config.remote_dir,
            "starting mirror loop"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        // The first tick fires immediately; the first pass should too.
        interval.tick().await;

        loop {
            match self.engine.run_pass(&self.config.local_dir).await {
                Ok(summary) => {
                    info!(
                        deleted = summary.files_deleted,
                        uploaded = summary.files_uploaded,
                        overwritten = summary.files_overwritten,
                        duration_ms = summary.duration_ms,
                        "pass completed"
                    );
                }
                Err(err) => {
                    error!(
                        kind = %err.kind_label(),
                        error = %err,
                        "reconciliation pass failed"
                    );
                }
            }

            // Wait for the next interval or shutdown.
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.shutdown.cancelled() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        info!("mirror loop terminated");
        Ok(())
    }
}

// ============================================================================
// Graceful shutdown signal handler
// ============================================================================

/// Waits for SIGTERM or SIGINT and triggers the cancellation token
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

// ============================================================================
// Tracing setup
// ============================================================================

/// Initializes the tracing subscriber according to the configured log sink
///
/// Events go to the configured log file (append mode, no ANSI colors) when
/// one is set, to stderr otherwise. The filter honours `RUST_LOG` and
/// defaults to `info`.
fn init_tracing(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
        }
    }

    Ok(())
}

// ============================================================================
// Main entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration errors are fatal before any pass begins.
    let config = Config::from_env().context("invalid startup configuration")?;
    init_tracing(&config)?;

    info!("updrive daemon starting (updrived)");

    let shutdown_token = CancellationToken::new();

    // Spawn signal handler task
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let service = MirrorService::new(config, shutdown_token);

    let result = service.run().await;

    match &result {
        Ok(()) => info!("updrive daemon shut down gracefully"),
        Err(e) => error!(error = %e, "updrive daemon exiting with error"),
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
