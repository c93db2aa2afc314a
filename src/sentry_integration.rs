//! Optional Sentry error tracking.
//!
//! The returned guard must live as long as the process so panics and
//! `error!` events are flushed.

pub fn init(dsn: &str, environment: Option<&str>) -> sentry::ClientInitGuard {
    let parsed_dsn = match dsn.parse() {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(error = %e, "invalid Sentry DSN, error tracking disabled");
            None
        }
    };

    let guard = sentry::init(sentry::ClientOptions {
        dsn: parsed_dsn,
        environment: environment.map(|e| e.to_string().into()),
        release: Some(concat!("zabbix-map@", env!("CARGO_PKG_VERSION")).into()),
        ..Default::default()
    });
    sentry::configure_scope(|scope| scope.set_tag("service", "zabbix-map"));
    guard
}
