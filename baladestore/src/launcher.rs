// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::AxumAppBuilder;
use crate::cfg::CfgParser;
use crate::core::env::{GetEnv, StdEnvGetter};
use crate::storage::ManageBalades;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use balade_base::error::BaladeError;
use balade_base::internal_server_error;
use balade_base::logger::Logger;
use log::{debug, error, info};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Read the configuration from the environment and serve until Ctrl-C or SIGTERM.
pub async fn launch_server() -> Result<(), BaladeError> {
    let version: &str = env!("CARGO_PKG_VERSION");

    Logger::init("INFO");
    info!(
        "BaladeStore {} [{} at {}]",
        version,
        env!("COMMIT"),
        env!("BUILD_TIME")
    );

    let parser = CfgParser::from_env(StdEnvGetter::default(), version);
    Logger::init(&parser.cfg.log_level);
    info!("Configuration: \n{}", parser);

    let handle = Handle::new();
    tokio::spawn(shutdown_ctrl_c(handle.clone()));
    #[cfg(unix)]
    tokio::spawn(shutdown_signal(handle.clone()));

    serve(parser, handle).await
}

async fn serve<EnvGetter: GetEnv>(
    parser: CfgParser<EnvGetter>,
    handle: Handle,
) -> Result<(), BaladeError> {
    let cfg = parser.cfg.clone();
    let components = Arc::new(parser.build().await?);
    let store = Arc::clone(&components.store);

    let sync_task = if cfg.store_conf.data_path.is_some() && !cfg.store_conf.sync_interval.is_zero()
    {
        Some(tokio::spawn(periodical_sync_store(
            Arc::clone(&store),
            cfg.store_conf.sync_interval,
        )))
    } else {
        None
    };

    let host = IpAddr::from_str(&cfg.host)
        .map_err(|err| internal_server_error!("Invalid host address '{}': {}", cfg.host, err))?;
    let addr = SocketAddr::new(host, cfg.port);
    let scheme = if cfg.tls_enabled() { "https" } else { "http" };
    info!(
        "Run HTTP BaladeStore on {}://{}:{}{}",
        scheme, cfg.host, cfg.port, cfg.api_base_path
    );

    let app = AxumAppBuilder::new(components).build();
    let served = match (&cfg.cert_path, &cfg.cert_key_path) {
        (Some(cert_path), Some(cert_key_path)) => {
            if rustls::crypto::aws_lc_rs::default_provider()
                .install_default()
                .is_err()
            {
                debug!("Rustls crypto provider is already installed");
            }
            let config = RustlsConfig::from_pem_file(cert_path, cert_key_path).await?;
            axum_server::bind_rustls(addr, config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
        _ => {
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    };

    // shutdown procedure
    if let Some(task) = sync_task {
        task.abort();
    }
    store.sync_fs().await?;
    info!("Server has been shut down.");
    served.map_err(BaladeError::from)
}

async fn shutdown_ctrl_c(server_handle: Handle) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", err);
        return;
    }
    info!("Received Ctrl-C, shutting down server...");
    server_handle.shutdown();
}

#[cfg(unix)]
async fn shutdown_signal(server_handle: Handle) {
    let mut signal =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(err) => {
                error!("Failed to listen for SIGTERM: {}", err);
                return;
            }
        };
    signal.recv().await;
    info!("Received termination signal, shutting down server...");
    server_handle.shutdown();
}

async fn periodical_sync_store(store: Arc<dyn ManageBalades>, sync_interval: Duration) {
    loop {
        tokio::time::sleep(sync_interval).await;
        if let Err(e) = store.sync_fs().await {
            error!("Failed to sync store: {}", e);
        }
    }
}
