use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::EncryptionService;
use crate::domain::identity::value_objects::{EncryptedPassword, PlainPassword};

/// Salted SHA-256 password encryption, hex encoded
///
/// The salt is fixed per deployment so equal passwords produce equal
/// ciphertexts, which credential lookup relies on.
pub struct Sha256EncryptionService {
  salt: String,
}

impl Sha256EncryptionService {
  pub fn new(salt: impl Into<String>) -> Self {
    Self { salt: salt.into() }
  }
}

#[async_trait]
impl EncryptionService for Sha256EncryptionService {
  async fn encrypted_value(
    &self,
    plaintext: &PlainPassword,
  ) -> Result<EncryptedPassword, IdentityError> {
    let mut hasher = Sha256::new();
    hasher.update(self.salt.as_bytes());
    hasher.update(plaintext.as_str().as_bytes());
    let digest = hasher.finalize();

    Ok(EncryptedPassword::new(hex::encode(digest))?)
  }
}
