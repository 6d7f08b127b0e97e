use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::LoggingConfig;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. Returns an error if
/// a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
  tracing_subscriber::registry()
    .with(build_filter(config))
    .with(tracing_subscriber::fmt::layer())
    .try_init()
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_second_init_fails() {
    let config = LoggingConfig::default();

    // another test may already have installed a subscriber
    let _ = init_tracing(&config);
    assert!(init_tracing(&config).is_err());
  }
}
