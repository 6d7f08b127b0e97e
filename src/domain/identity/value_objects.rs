use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::ValidationError;
use crate::domain::common::{EqualityComponent, ValueObject};

/// Trims `value` and rejects it when nothing is left
pub(crate) fn required_text(value: &str, field: &str) -> Result<String, ValidationError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::missing(field));
  }
  Ok(trimmed.to_string())
}

// ============================================================================
// TenantId Value Object
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
  /// Creates a TenantId from an existing identifier
  pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
    Ok(Self(required_text(id.as_ref(), "tenant_id")?))
  }

  /// Generates a fresh, upper-case UUID based identifier
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string().to_uppercase())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl ValueObject for TenantId {
  fn equality_components(&self) -> Vec<EqualityComponent<'_>> {
    vec![self.0.as_str().into()]
  }
}

impl fmt::Display for TenantId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for TenantId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// EmailAddress Value Object
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
  /// Creates an email address after validation, normalized to lowercase
  pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
    let email = required_text(email.as_ref(), "email_address")?;

    if !email.validate_email() {
      return Err(ValidationError::InvalidField {
        field: "email_address".to_string(),
      });
    }

    Ok(Self(email.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl ValueObject for EmailAddress {
  fn equality_components(&self) -> Vec<EqualityComponent<'_>> {
    vec![self.0.as_str().into()]
  }
}

impl fmt::Display for EmailAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// PlainPassword (never stored, never logged)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PlainPassword(String);

impl PlainPassword {
  /// Wraps a plaintext password; it must not be empty
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = password.into();
    if password.is_empty() {
      return Err(ValidationError::missing("password"));
    }
    Ok(Self(password))
  }

  /// Returns the plaintext (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for PlainPassword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PlainPassword(***)")
  }
}

impl fmt::Display for PlainPassword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// EncryptedPassword Value Object
// ============================================================================

/// Output of the one-way encryption applied to a plaintext password
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptedPassword(String);

impl EncryptedPassword {
  pub fn new(ciphertext: impl Into<String>) -> Result<Self, ValidationError> {
    let ciphertext = ciphertext.into();
    if ciphertext.is_empty() {
      return Err(ValidationError::missing("encrypted_password"));
    }
    Ok(Self(ciphertext))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl ValueObject for EncryptedPassword {
  fn equality_components(&self) -> Vec<EqualityComponent<'_>> {
    vec![self.0.as_str().into()]
  }
}

impl fmt::Debug for EncryptedPassword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("EncryptedPassword(***)")
  }
}

// ============================================================================
// UserDescriptor Value Object
// ============================================================================

/// Read-only projection of an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDescriptor {
  tenant_id: TenantId,
  username: String,
  email_address: String,
}

impl UserDescriptor {
  pub(crate) fn new(tenant_id: TenantId, username: String, email_address: String) -> Self {
    Self {
      tenant_id,
      username,
      email_address,
    }
  }

  pub fn tenant_id(&self) -> &TenantId {
    &self.tenant_id
  }

  pub fn username(&self) -> &str {
    &self.username
  }

  pub fn email_address(&self) -> &str {
    &self.email_address
  }
}

impl ValueObject for UserDescriptor {
  fn equality_components(&self) -> Vec<EqualityComponent<'_>> {
    vec![
      EqualityComponent::of(&self.tenant_id),
      self.username.as_str().into(),
      self.email_address.as_str().into(),
    ]
  }
}

// ============================================================================
// InvitationDescriptor Value Object
// ============================================================================

/// Immutable snapshot of a registration invitation for callers that must not
/// mutate it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationDescriptor {
  pub tenant_id: TenantId,
  pub invitation_id: String,
  pub description: Option<String>,
  pub starting_on: Option<DateTime<Utc>>,
  pub until: Option<DateTime<Utc>>,
}

impl InvitationDescriptor {
  /// True when the descriptor carries no validity window
  pub fn is_open_ended(&self) -> bool {
    self.starting_on.is_none() && self.until.is_none()
  }
}

impl ValueObject for InvitationDescriptor {
  fn equality_components(&self) -> Vec<EqualityComponent<'_>> {
    vec![
      EqualityComponent::of(&self.tenant_id),
      self.invitation_id.as_str().into(),
      self.description.as_deref().into(),
      self.starting_on.into(),
      self.until.into(),
    ]
  }
}

crate::value_object_equality!(
  TenantId,
  EmailAddress,
  EncryptedPassword,
  UserDescriptor,
  InvitationDescriptor
);

// ============================================================================
// AuthenticationResult
// ============================================================================

/// Outcome of an authentication attempt
///
/// Every denial reason collapses into `NotAuthenticated` so callers cannot
/// tell an unknown tenant from a disabled user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult {
  Authenticated(UserDescriptor),
  NotAuthenticated,
}

impl AuthenticationResult {
  pub fn is_authenticated(&self) -> bool {
    matches!(self, Self::Authenticated(_))
  }

  pub fn descriptor(&self) -> Option<&UserDescriptor> {
    match self {
      Self::Authenticated(descriptor) => Some(descriptor),
      Self::NotAuthenticated => None,
    }
  }

  pub fn into_descriptor(self) -> Option<UserDescriptor> {
    match self {
      Self::Authenticated(descriptor) => Some(descriptor),
      Self::NotAuthenticated => None,
    }
  }
}
