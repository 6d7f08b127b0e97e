use std::sync::Arc;

use super::errors::{IdentityError, ValidationError};
use super::ports::{EncryptionService, TenantRepository, UserRepository};
use super::value_objects::{AuthenticationResult, PlainPassword, TenantId};

/// Authentication service deciding whether credentials identify an enabled
/// user of an active tenant
///
/// The service holds no mutable state; it only reads through its collaborators.
pub struct AuthenticationService {
  tenant_repo: Arc<dyn TenantRepository>,
  user_repo: Arc<dyn UserRepository>,
  encryption_service: Arc<dyn EncryptionService>,
}

impl AuthenticationService {
  /// Creates a new instance of AuthenticationService
  pub fn new(
    tenant_repo: Arc<dyn TenantRepository>,
    user_repo: Arc<dyn UserRepository>,
    encryption_service: Arc<dyn EncryptionService>,
  ) -> Self {
    Self {
      tenant_repo,
      user_repo,
      encryption_service,
    }
  }

  /// Authenticates a user within a tenant
  ///
  /// # Arguments
  /// * `tenant_id` - The tenant the user belongs to
  /// * `username` - The user's username, trimmed as it is at registration
  /// * `password` - The plaintext password
  ///
  /// # Returns
  /// `AuthenticationResult::Authenticated` with the user's descriptor, or
  /// `AuthenticationResult::NotAuthenticated` when the tenant is unknown or
  /// inactive, or the user is unknown or disabled
  ///
  /// # Errors
  /// Returns `IdentityError::Validation` if `username` or `password` is empty,
  /// and propagates collaborator failures
  pub async fn authenticate(
    &self,
    tenant_id: &TenantId,
    username: &str,
    password: &str,
  ) -> Result<AuthenticationResult, IdentityError> {
    let username = username.trim();
    if username.is_empty() {
      return Err(ValidationError::missing("username").into());
    }
    let password = PlainPassword::new(password)?;

    let tenant = self.tenant_repo.tenant_of_id(tenant_id).await?;
    if !tenant.is_some_and(|tenant| tenant.is_active()) {
      tracing::debug!(%tenant_id, "Authentication denied: tenant unknown or inactive");
      return Ok(AuthenticationResult::NotAuthenticated);
    }

    let encrypted_password = self.encryption_service.encrypted_value(&password).await?;

    let user = self
      .user_repo
      .user_from_authentic_credentials(tenant_id, username, &encrypted_password)
      .await?;

    match user {
      Some(user) if user.is_enabled() => {
        tracing::debug!(%tenant_id, username, "Authentication succeeded");
        Ok(AuthenticationResult::Authenticated(user.user_descriptor()))
      }
      _ => {
        tracing::debug!(%tenant_id, username, "Authentication denied: user unknown or disabled");
        Ok(AuthenticationResult::NotAuthenticated)
      }
    }
  }
}
