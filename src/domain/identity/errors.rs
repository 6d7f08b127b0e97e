use thiserror::Error;

/// Main identity-access error type
///
/// Authentication denial is not represented here; it is a routine outcome
/// carried by `AuthenticationResult`.
#[derive(Debug, Error)]
pub enum IdentityError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Invalid state: {0}")]
  InvalidState(String),

  #[error("Tenant not found")]
  TenantNotFound,

  #[error("Tenant is not active")]
  TenantInactive,

  #[error("Invitation not found")]
  InvitationNotFound,

  #[error("Invitation is not available")]
  InvitationUnavailable,

  #[error("An invitation identified by '{0}' already exists")]
  DuplicateInvitation(String),

  #[error("Username already taken")]
  UsernameTaken,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Encryption error: {0}")]
  Encryption(#[from] EncryptionError),
}

impl IdentityError {
  pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
    Self::InvalidState(message.into())
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Repository unavailable: {0}")]
  Unavailable(String),
}

/// Password encryption errors
#[derive(Debug, Error)]
pub enum EncryptionError {
  #[error("Failed to encrypt value: {0}")]
  EncryptionFailed(String),

  #[error("Invalid encryption configuration: {0}")]
  InvalidConfiguration(String),
}

/// Input validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("Missing required field: {field}")]
  MissingField { field: String },

  #[error("Invalid field: {field}")]
  InvalidField { field: String },

  #[error("Validity window must start on or before its end")]
  InvalidWindow,
}

impl ValidationError {
  pub(crate) fn missing(field: &str) -> Self {
    Self::MissingField {
      field: field.to_string(),
    }
  }
}

impl From<argon2::password_hash::Error> for EncryptionError {
  fn from(error: argon2::password_hash::Error) -> Self {
    use argon2::password_hash::Error;
    match error {
      Error::SaltInvalid(_) | Error::B64Encoding(_) => {
        EncryptionError::InvalidConfiguration(error.to_string())
      }
      _ => EncryptionError::EncryptionFailed(error.to_string()),
    }
  }
}
