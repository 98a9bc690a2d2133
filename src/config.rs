use tracing_subscriber::EnvFilter;

#[cfg(feature = "translate-in")]
pub mod relay;

pub const LOG_FILTER_VAR: &str = "RUST_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter from `var`, read after `.env` has been loaded.
pub fn log_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(feature = "translate-in")]
pub fn validate() -> anyhow::Result<relay::RelayConfig> {
    relay::RelayConfig::from_env()
}
