//! Zabbix Map is a REST API that turns Zabbix hosts into map-ready devices.
//!
//! It calls the Zabbix JSON-RPC API (`host.get`), normalizes every host
//! into a [`Device`](device::Device) with a display name, type, status,
//! region code and coordinates, and serves the result as JSON. When
//! Zabbix is not configured or does not answer, a built-in example fleet
//! is served instead so the map always has something to draw.
//!
//! # Architecture
//!
//! - [`api`] -- REST handlers, the response envelope, and the mock fallback.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch (run, init, validate, health, probe).
//! - [`config`] -- Configuration loading, validation, overrides and hot reload.
//! - [`device`] -- The host-to-device normalizer, coordinate resolution,
//!   aggregate stats, and the example fleet.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum server setup, shared state, HTTP client, graceful shutdown.
//! - [`zabbix`] -- JSON-RPC client, wire types, and the connectivity probe.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `sentry-integration` | Sentry error tracking |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod device;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;
pub mod zabbix;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
