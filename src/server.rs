//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the loaded
//! config, the Zabbix host source, counters, and uptime), [`build_router`]
//! for the Axum router with its middleware layers, [`build_http_client`]
//! for the pooled hyper client used to reach Zabbix, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::model::Config;
use crate::config::ConfigVersion;
use crate::health::health_handler;
use crate::zabbix::{HostSource, ZabbixClient};

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Arc<Config>,
    pub version: ConfigVersion,
    pub source_name: String,
    pub loaded_at: Instant,
    /// `None` while Zabbix is not configured; handlers then serve the mock fleet.
    pub hosts: Option<Arc<dyn HostSource>>,
}

impl LoadedConfig {
    /// Wrap `config`, building a Zabbix client when URL and token are set.
    pub fn new(config: Config, version: ConfigVersion, source_name: impl Into<String>) -> Self {
        let hosts = if config.zabbix_configured() {
            let http = build_http_client(config.zabbix.accept_invalid_certs);
            match ZabbixClient::from_config(&config.zabbix, http) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn HostSource>),
                Err(e) => {
                    tracing::warn!(error = %e, "zabbix client unavailable, serving example fleet");
                    None
                }
            }
        } else {
            tracing::warn!("zabbix api_url / auth_token not set, serving example fleet");
            None
        };
        Self::with_source(config, version, source_name, hosts)
    }

    pub fn with_source(
        config: Config,
        version: ConfigVersion,
        source_name: impl Into<String>,
        hosts: Option<Arc<dyn HostSource>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            version,
            source_name: source_name.into(),
            loaded_at: Instant::now(),
            hosts,
        }
    }
}

#[derive(Debug)]
pub struct Stats {
    pub zabbix_requests: AtomicU64,
    pub zabbix_failures: AtomicU64,
    pub mock_fallbacks: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zabbix_requests: AtomicU64::new(0),
            zabbix_failures: AtomicU64::new(0),
            mock_fallbacks: AtomicU64::new(0),
        }
    }
}

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;

pub struct AppState {
    pub config: RwLock<LoadedConfig>,
    pub start_time: Instant,
    /// Listen port, echoed in `meta.server` of device listings.
    pub port: u16,
    pub stats: Stats,
}

impl AppState {
    #[must_use]
    pub fn new(loaded: LoadedConfig, port: u16) -> Self {
        Self {
            config: RwLock::new(loaded),
            start_time: Instant::now(),
            port,
            stats: Stats::new(),
        }
    }
}

#[must_use]
pub fn build_http_client(accept_invalid_certs: bool) -> HttpClient {
    // When multiple rustls crypto providers are compiled in (e.g. `--all-features`
    // pulls `aws-lc-rs` through sentry), rustls cannot pick one on its own.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = if accept_invalid_certs {
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(crate::zabbix::tls::accept_invalid_certs_config())
            .https_or_http()
            .enable_http1()
            .build()
    } else {
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build()
    };
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https)
}

/// CORS policy for `cors.origin`: `*` or a single exact origin.
#[must_use]
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
        Err(e) => {
            tracing::error!(origin, error = %e, "invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}

pub fn build_router(state: Arc<AppState>, cors_origin: &str) -> Router {
    Router::new()
        .route("/", get(api::docs_handler))
        .route("/health", get(health_handler))
        .route("/api/devices", get(api::devices::list_handler))
        .route("/api/devices/{id}", get(api::devices::get_handler))
        .route("/api/stats", get(api::devices::stats_handler))
        .route("/api/states", get(api::devices::states_handler))
        .route("/api/zabbix/status", get(api::status::zabbix_status_handler))
        .fallback(api::not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origin)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
