use argon2::password_hash::{Salt, SaltString};
use argon2::{
  Algorithm, Argon2, Params, Version, password_hash::PasswordHasher as Argon2PasswordHasherTrait,
};
use async_trait::async_trait;

use crate::domain::identity::errors::{EncryptionError, IdentityError};
use crate::domain::identity::ports::EncryptionService;
use crate::domain::identity::value_objects::{EncryptedPassword, PlainPassword};

/// Argon2id password encryption with a deployment-wide salt
///
/// Uses the Argon2id algorithm with parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
///
/// The salt is configured rather than random, so the output is a
/// deterministic PHC string that can be matched by equality.
pub struct Argon2EncryptionService {
  argon2: Argon2<'static>,
  salt: SaltString,
}

impl Argon2EncryptionService {
  /// Creates a new Argon2EncryptionService
  ///
  /// # Errors
  /// Returns `EncryptionError::InvalidConfiguration` if `salt` is too short or
  /// too long to be used as an Argon2 salt
  pub fn new(salt: &str) -> Result<Self, EncryptionError> {
    // Memory cost: 19 MiB = 19456 KiB
    let memory_cost = 19456;
    let time_cost = 2;
    let parallelism = 1;
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len).map_err(|e| {
      EncryptionError::InvalidConfiguration(format!("Failed to create Argon2 params: {}", e))
    })?;

    let salt = SaltString::encode_b64(salt.as_bytes())
      .map_err(|e| EncryptionError::InvalidConfiguration(format!("Invalid salt: {}", e)))?;
    // encode_b64 only checks the upper bound; hashing expects a parseable salt
    Salt::from_b64(salt.as_str())
      .map_err(|e| EncryptionError::InvalidConfiguration(format!("Invalid salt: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
      salt,
    })
  }
}

#[async_trait]
impl EncryptionService for Argon2EncryptionService {
  async fn encrypted_value(
    &self,
    plaintext: &PlainPassword,
  ) -> Result<EncryptedPassword, IdentityError> {
    let hash = self
      .argon2
      .hash_password(plaintext.as_str().as_bytes(), &self.salt)
      .map_err(EncryptionError::from)?;

    Ok(EncryptedPassword::new(hash.to_string())?)
  }
}
