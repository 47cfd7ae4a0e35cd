//! Tracing setup for binaries and integration harnesses

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "sportstore=info";

/// Install the global subscriber; `RUST_LOG` overrides the default `sportstore=info`
pub fn init_tracing() -> Result<(), TryInitError> {
    init_tracing_with_default(DEFAULT_FILTER)
}

pub fn init_tracing_with_default(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
