use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_log_filter() -> String {
  "identity_access=info".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub security: SecurityConfig,
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// Password encryption algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionAlgorithm {
  #[default]
  Sha256,
  Argon2id,
}

/// Security configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  #[serde(default)]
  pub encryption_algorithm: EncryptionAlgorithm,
  /// Deployment-wide salt mixed into every encrypted password
  pub encryption_salt: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// `EnvFilter` directive used when `RUST_LOG` is not set
  #[serde(default = "default_log_filter")]
  pub filter: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      filter: default_log_filter(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with IDENTITY_ prefix
  ///
  /// A `.env` file in the working directory is read first, if present.
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the IDENTITY_ prefix and are separated by double underscores:
  /// - `IDENTITY_SECURITY__ENCRYPTION_ALGORITHM=argon2id`
  /// - `IDENTITY_SECURITY__ENCRYPTION_SALT=change-me`
  /// - `IDENTITY_LOGGING__FILTER=identity_access=debug`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if:
  /// - config/default.toml is missing
  /// - Configuration files contain invalid TOML
  /// - Required configuration values are missing or have invalid types
  pub fn load() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("IDENTITY")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [security]
            encryption_algorithm = "argon2id"
            encryption_salt = "change-me-please"

            [logging]
            filter = "identity_access=debug"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(
      config.security.encryption_algorithm,
      EncryptionAlgorithm::Argon2id
    );
    assert_eq!(config.security.encryption_salt, "change-me-please");
    assert_eq!(config.logging.filter, "identity_access=debug");
  }

  #[test]
  fn test_config_defaults() {
    let toml = r#"
            [security]
            encryption_salt = "change-me-please"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(
      config.security.encryption_algorithm,
      EncryptionAlgorithm::Sha256
    );
    assert_eq!(config.logging.filter, "identity_access=info");
  }

  #[test]
  fn test_config_requires_salt() {
    let toml = r#"
            [security]
            encryption_algorithm = "sha256"
        "#;

    assert!(toml::from_str::<Config>(toml).is_err());
  }
}
