//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "ICON_VARIANTS_LOG";

/// Initialize the logging subsystem.
///
/// Logs go to stderr so stdout stays reserved for progress lines. The filter
/// comes from `ICON_VARIANTS_LOG` when set, otherwise `warn` (or `debug` when
/// `verbose` is on). An unparsable `ICON_VARIANTS_LOG` falls back to the
/// default and says so with a warning.
///
/// ```bash
/// ICON_VARIANTS_LOG=icon_variants=trace icon-variants icons/
/// ```
pub fn init(verbose: bool) {
    let spec = std::env::var(LOG_ENV).ok();
    let (env_filter, rejected) = build_filter(spec.as_deref(), verbose);

    // A second init (e.g. from tests) is harmless, so the error is dropped.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();

    if let Some(reason) = rejected {
        tracing::warn!("Ignoring {LOG_ENV}: {reason}");
    }
}

/// Filter from `spec` if it parses, otherwise the default level plus the
/// reason `spec` was rejected.
fn build_filter(spec: Option<&str>, verbose: bool) -> (EnvFilter, Option<String>) {
    let default_level = if verbose { "debug" } else { "warn" };
    match spec.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(err)) => (
            EnvFilter::new(default_level),
            Some(format!("invalid filter {:?} ({err})", spec.unwrap_or_default())),
        ),
        None => (EnvFilter::new(default_level), None),
    }
}
