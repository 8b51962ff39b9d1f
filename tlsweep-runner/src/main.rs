//! Tlsweep Runner
//!
//! Scans a list of hosts with the SSL Labs analyze API and stores each
//! finished report in a Postgres-backed document collection.
//!
//! Architecture:
//! - Configuration: Load settings from environment with documented defaults
//! - Repositories: analyze API calls and report collection writes
//! - Services: scan polling and report storage
//! - Scheduler: sequential per-host orchestration
//!
//! Host failures are logged and never stop the run; the process exits
//! successfully once every host has been attempted.

mod config;
mod db;
mod error;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::PgReportRepository;
use crate::scheduler::ScanOrchestrator;
use crate::service::{PollSettings, ReportStore, ScanPoller};
use tlsweep_client::SslLabsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tlsweep_runner=info,tlsweep_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tlsweep Runner");

    // Load configuration
    let config = load_config()?;
    info!(
        "Loaded configuration: api_url={}, database={}, collection={}",
        config.api_url, config.database_name, config.collection_name
    );

    // Initialize API client
    let client = Arc::new(SslLabsClient::new(
        config.api_url.clone(),
        config.email.clone(),
    ));

    // Initialize database pool
    let pool = db::create_pool(&config.database_url, &config.database_name)
        .context("Invalid database configuration")?;

    if let Err(e) = db::ensure_collection(&pool, &config.collection_name).await {
        warn!(
            "Could not prepare collection {}: {}; inserts will be attempted anyway",
            config.collection_name, e
        );
    }

    let reports = Arc::new(PgReportRepository::new(
        pool.clone(),
        config.collection_name.clone(),
    ));

    // Initialize services
    let poller = ScanPoller::new(client, PollSettings::from(&config));
    let store = ReportStore::new(reports);

    info!(
        "Poll interval: {:?}, max poll attempts: {}",
        config.poll_interval,
        config
            .max_poll_attempts
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );

    let orchestrator = ScanOrchestrator::new(poller, store, config.hosts.clone());
    let outcomes = orchestrator.run().await;

    let stored = outcomes.iter().filter(|o| o.is_stored()).count();
    info!(
        "Run finished: {} stored, {} failed",
        stored,
        outcomes.len() - stored
    );

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.is_stored())
        .map(|o| o.host.as_str())
        .collect();
    if !failed.is_empty() {
        warn!("Hosts without a stored report: {}", failed.join(", "));
    }

    pool.close().await;

    Ok(())
}

/// Loads `.env` (if present) and the environment, then validates the configuration
fn load_config() -> Result<Config> {
    if let Some(path) = config::load_env_file(None) {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    Ok(config)
}
