use std::fmt;
use std::sync::Arc;

use super::load_tenant;
use crate::domain::common::Clock;
use crate::domain::identity::errors::{IdentityError, RepositoryError};
use crate::domain::identity::ports::{EncryptionService, TenantRepository, UserRepository};
use crate::domain::identity::value_objects::{PlainPassword, UserDescriptor};

/// Command for registering a user through a registration invitation
#[derive(Clone)]
pub struct RegisterUserCommand {
  pub tenant_id: String,
  /// Invitation id or description
  pub invitation_identifier: String,
  pub username: String,
  /// User's password (plain text, will be encrypted)
  pub password: String,
  pub email_address: String,
}

impl fmt::Debug for RegisterUserCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegisterUserCommand")
      .field("tenant_id", &self.tenant_id)
      .field("invitation_identifier", &self.invitation_identifier)
      .field("username", &self.username)
      .field("password", &"***")
      .field("email_address", &self.email_address)
      .finish()
  }
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  tenant_repo: Arc<dyn TenantRepository>,
  user_repo: Arc<dyn UserRepository>,
  encryption_service: Arc<dyn EncryptionService>,
  clock: Arc<dyn Clock>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(
    tenant_repo: Arc<dyn TenantRepository>,
    user_repo: Arc<dyn UserRepository>,
    encryption_service: Arc<dyn EncryptionService>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self {
      tenant_repo,
      user_repo,
      encryption_service,
      clock,
    }
  }

  /// Executes the user registration use case
  ///
  /// # Returns
  /// The descriptor of the newly registered user
  ///
  /// # Errors
  /// Returns `IdentityError::InvitationUnavailable` if the invitation is not
  /// available at the clock's instant and `IdentityError::UsernameTaken` if
  /// the username already exists in the tenant
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<UserDescriptor, IdentityError> {
    let tenant = load_tenant(self.tenant_repo.as_ref(), &command.tenant_id).await?;
    let password = PlainPassword::new(command.password)?;

    if self
      .user_repo
      .user_with_username(&tenant.tenant_id, command.username.trim())
      .await?
      .is_some()
    {
      return Err(IdentityError::UsernameTaken);
    }

    let encrypted_password = self.encryption_service.encrypted_value(&password).await?;

    let user = tenant.register_user(
      &command.invitation_identifier,
      &command.username,
      encrypted_password,
      &command.email_address,
      self.clock.now(),
    )?;
    let descriptor = user.user_descriptor();

    match self.user_repo.add(user).await {
      Ok(()) => {}
      Err(IdentityError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(IdentityError::UsernameTaken);
      }
      Err(e) => return Err(e),
    }

    tracing::info!(
      tenant_id = %descriptor.tenant_id(),
      username = descriptor.username(),
      "User registered"
    );

    Ok(descriptor)
  }
}
