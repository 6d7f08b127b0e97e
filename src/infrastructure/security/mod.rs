mod argon2_encryption;
mod sha256_encryption;

use std::sync::Arc;

pub use argon2_encryption::Argon2EncryptionService;
pub use sha256_encryption::Sha256EncryptionService;

use crate::domain::identity::errors::EncryptionError;
use crate::domain::identity::ports::EncryptionService;
use crate::infrastructure::config::{EncryptionAlgorithm, SecurityConfig};

/// Builds the encryption adapter selected in configuration
pub fn encryption_service(
  config: &SecurityConfig,
) -> Result<Arc<dyn EncryptionService>, EncryptionError> {
  if config.encryption_salt.is_empty() {
    return Err(EncryptionError::InvalidConfiguration(
      "encryption_salt must not be empty".to_string(),
    ));
  }

  tracing::debug!(algorithm = ?config.encryption_algorithm, "Using password encryption");

  match config.encryption_algorithm {
    EncryptionAlgorithm::Sha256 => Ok(Arc::new(Sha256EncryptionService::new(
      config.encryption_salt.clone(),
    ))),
    EncryptionAlgorithm::Argon2id => Ok(Arc::new(Argon2EncryptionService::new(
      &config.encryption_salt,
    )?)),
  }
}
