//! subtrack HTTP server entry point.
//!
//! Usage: `subtrack-server [config.toml]`. Without an argument the path comes
//! from `SUBTRACK_CONFIG`, falling back to `subtrack.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use subtrack_core::config::{SubtrackConfig, DEFAULT_CONFIG_FILE};
use subtrack_core::services::{ensure_admin, BootstrapOutcome};
use subtrack_core::telemetry::init_tracing;
use subtrack_server::{build_cors, configure, json_config, AppState, AuthMiddleware, LoggingMiddleware};
use subtrack_storage::StorageEngine;
use tracing::info;

fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("SUBTRACK_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path();
    let config = SubtrackConfig::load(&path).context("loading configuration")?;
    init_tracing(&config.observability).context("initialising tracing")?;
    config.validate().context("validating configuration")?;
    info!(config = %path.display(), "configuration loaded");

    let storage =
        Arc::new(StorageEngine::from_config(&config.storage).context("opening database")?);
    let state = AppState::from_config(storage, &config);

    let bootstrap_state = state.clone();
    let bootstrap = config.bootstrap.clone();
    let debug_mode = config.observability.debug;
    let outcome = web::block(move || ensure_admin(&bootstrap_state.users, &bootstrap, debug_mode))
        .await
        .context("admin bootstrap task")?
        .context("admin bootstrap")?;
    if let BootstrapOutcome::Created { user_id, .. }
    | BootstrapOutcome::Rotated { user_id }
    | BootstrapOutcome::Promoted { user_id } = &outcome
    {
        info!(%user_id, "admin account ready");
    }

    let (host, port) = config.server.bind_address();
    info!(%host, port, "starting HTTP server");

    let server_config = config.server.clone();
    let data = web::Data::new(state);
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(json_config())
            .wrap(AuthMiddleware)
            .wrap(build_cors(&server_config))
            .wrap(LoggingMiddleware)
            .configure(configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server
        .bind((host.as_str(), port))
        .with_context(|| format!("binding {host}:{port}"))?
        .run()
        .await
        .context("running HTTP server")
}
