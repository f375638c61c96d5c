// institute-mirror/crates/institute-mirror/src/telemetry.rs

use tracing_subscriber::{fmt, EnvFilter};

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn,institute_mirror=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber for the mirror's logs.
/// Calling it again leaves the first subscriber in place.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
