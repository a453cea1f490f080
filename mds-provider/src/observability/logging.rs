use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: `RUST_LOG` when set, otherwise `log_level`,
/// rendered as flattened JSON with source locations.
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing(service_name: &str, log_level: &str) {
    if let Err(e) = try_init_tracing(service_name, log_level) {
        panic!("Failed to initialize tracing for '{}': {}", service_name, e);
    }
}

pub fn try_init_tracing(service_name: &str, log_level: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init()?;

    tracing::debug!(service = %service_name, "tracing initialized");
    Ok(())
}
