//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, init, validate, health, probe), and their argument
//! structs. Every flag has an environment variable equivalent for
//! container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Overrides;

#[derive(Parser)]
#[command(
    name = "zabbix-map",
    version,
    about = "Geolocated device API over Zabbix",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        zabbix-map init                      Create a starter config\n  \
        zabbix-map run                       Start with ./zabbix-map.yaml\n  \
        zabbix-map probe                     Check the Zabbix URL and token\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Run(Box<RunArgs>),

    /// Generate a starter config file
    Init(InitArgs),

    /// Validate a config file without starting
    Validate(ValidateArgs),

    /// Check health of a running instance
    Health(HealthArgs),

    /// Check Zabbix reachability and the auth token
    Probe(ProbeArgs),
}

/// Zabbix connection settings shared by `run` and `probe`.
#[derive(Args, Clone, Debug, Default)]
pub struct ZabbixArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Zabbix JSON-RPC endpoint, e.g. `https://zabbix.local/api_jsonrpc.php`
    #[arg(long, env = "ZABBIX_API_URL", help_heading = "Zabbix")]
    pub api_url: Option<String>,

    /// Zabbix API token
    #[arg(
        long,
        env = "ZABBIX_AUTH_TOKEN",
        hide_env_values = true,
        help_heading = "Zabbix"
    )]
    pub auth_token: Option<String>,

    /// Upstream timeout in milliseconds
    #[arg(long, env = "ZABBIX_TIMEOUT_MS", help_heading = "Zabbix")]
    pub zabbix_timeout: Option<u64>,

    /// Require a valid certificate chain on the Zabbix frontend
    #[arg(long, env = "ZABBIX_VERIFY_TLS", help_heading = "Zabbix")]
    pub verify_tls: bool,
}

impl ZabbixArgs {
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            auth_token: self.auth_token.clone(),
            timeout: self.zabbix_timeout,
            accept_invalid_certs: self.verify_tls.then_some(false),
            ..Overrides::default()
        }
    }
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        zabbix-map run                                     Auto-detect config\n  \
        zabbix-map run -c zabbix-map.yaml -p 8080 --pretty Local dev mode\n  \
        ZABBIX_API_URL=https://zbx/api_jsonrpc.php ZABBIX_AUTH_TOKEN=... zabbix-map run")]
pub struct RunArgs {
    #[command(flatten)]
    pub zabbix: ZabbixArgs,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server address reported in device listings
    #[arg(long, env = "SERVER_IP")]
    pub server_ip: Option<String>,

    /// Allowed CORS origin (`*` or `https://map.example.com`)
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Observability --
    /// Sentry DSN (enables error tracking)
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_DSN", help_heading = "Observability")]
    pub sentry_dsn: Option<String>,

    /// Sentry environment tag
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_ENVIRONMENT", help_heading = "Observability")]
    pub sentry_environment: Option<String>,

    // -- Tuning --
    /// Config file poll interval in seconds (0 disables hot reload)
    #[arg(
        long,
        env = "POLL_INTERVAL_SECS",
        default_value_t = 30,
        help_heading = "Tuning"
    )]
    pub poll_interval: u64,
}

impl RunArgs {
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            server_ip: self.server_ip.clone(),
            cors_origin: self.cors_origin.clone(),
            ..self.zabbix.overrides()
        }
    }
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        zabbix-map init                          Quick start config (yaml)\n  \
        zabbix-map init -i                       Interactive wizard\n  \
        zabbix-map init -f toml -o config.toml   Non-interactive, TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Launch interactive wizard to build config step by step
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "zabbix-map.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub zabbix: ZabbixArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
