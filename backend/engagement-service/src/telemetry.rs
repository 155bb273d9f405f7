/// Tracing initialization for embedding binaries.
///
/// The engagement engine itself only emits `tracing` events; the process that
/// hosts it (HTTP surface, worker, test harness) decides where they go.
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global subscriber reading `RUST_LOG` (default `info`).
///
/// Safe to call once per process; later calls are ignored.
pub fn init_tracing(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_level(true))
        .try_init();

    tracing::info!(service = service_name, "tracing initialized");
}
