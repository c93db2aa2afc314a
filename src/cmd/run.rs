//! `zabbix-map run`: start the API server.
//!
//! Resolves the config (file plus flag/env overrides), starts the Axum
//! server with graceful shutdown, and spawns a background refresh loop
//! that hot-reloads the file and rebuilds the Zabbix client.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::RunArgs;
use crate::config::validation;
use crate::config::ConfigResolver;
use crate::error::ZabbixMapError;
use crate::logging;
use crate::server::{self, AppState, LoadedConfig};

pub async fn execute(args: RunArgs) -> Result<(), ZabbixMapError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args
        .sentry_dsn
        .as_ref()
        .map(|dsn| crate::sentry_integration::init(dsn, args.sentry_environment.as_deref()));

    let resolver = ConfigResolver::discover(args.zabbix.config.as_deref(), args.overrides()).await?;
    let (config, version) = resolver.load().await?;
    for warning in validation::warnings(&config) {
        tracing::warn!("{warning}");
    }

    let cors_origin = config.cors.origin.clone();
    let loaded = LoadedConfig::new(config, version, resolver.source_name());
    let zabbix_endpoint = loaded.hosts.as_ref().map(|h| h.endpoint().to_string());
    let state = Arc::new(AppState::new(loaded, args.port));

    // Shutdown signal: dropping shutdown_tx closes the channel and stops the refresh loop
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let refresh_handle = if resolver.watches_file() && args.poll_interval > 0 {
        let refresh_state = state.clone();
        let poll_interval = args.poll_interval;
        Some(tokio::spawn(async move {
            config_refresh_loop(refresh_state, resolver, poll_interval, shutdown_rx).await;
        }))
    } else {
        None
    };

    let router = server::build_router(state, &cors_origin);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        zabbix = zabbix_endpoint.as_deref().unwrap_or("example data"),
        cors = %cors_origin,
        "zabbix-map started"
    );

    let graceful_shutdown = async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    if let Some(handle) = refresh_handle {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "config refresh task failed");
        }
    }

    tracing::info!("zabbix-map stopped");
    Ok(())
}

/// Poll the config file and swap in a fresh [`LoadedConfig`] on change.
///
/// A reload that fails to parse or validate keeps the running config.
/// The CORS layer is fixed at startup.
pub async fn config_refresh_loop(
    state: Arc<AppState>,
    resolver: ConfigResolver,
    interval_secs: u64,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // Skip first immediate tick

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                tracing::debug!("config refresh loop shutting down");
                return;
            }
        }

        let current_version = state.config.read().await.version.clone();

        match resolver.has_changed(&current_version).await {
            Ok(true) => {
                tracing::info!("config change detected, reloading");
                match resolver.load().await {
                    Ok((config, version)) => {
                        if config.cors != state.config.read().await.config.cors {
                            tracing::warn!("cors.origin changed; restart to apply it");
                        }
                        let fresh = LoadedConfig::new(config, version, resolver.source_name());
                        let configured = fresh.hosts.is_some();
                        *state.config.write().await = fresh;
                        tracing::info!(zabbix_configured = configured, "config reloaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "config reload failed, keeping current config");
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "config change check failed");
            }
        }
    }
}
