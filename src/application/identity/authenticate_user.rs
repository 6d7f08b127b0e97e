use std::fmt;
use std::sync::Arc;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::services::AuthenticationService;
use crate::domain::identity::value_objects::{AuthenticationResult, TenantId};

/// Command for authenticating a user within a tenant
#[derive(Clone)]
pub struct AuthenticateUserCommand {
  /// Raw tenant identifier
  pub tenant_id: String,
  /// User's username
  pub username: String,
  /// User's password (plain text)
  pub password: String,
}

impl fmt::Debug for AuthenticateUserCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuthenticateUserCommand")
      .field("tenant_id", &self.tenant_id)
      .field("username", &self.username)
      .field("password", &"***")
      .finish()
  }
}

/// Use case for authenticating a user
pub struct AuthenticateUserUseCase {
  authentication_service: Arc<AuthenticationService>,
}

impl AuthenticateUserUseCase {
  /// Creates a new instance of AuthenticateUserUseCase
  pub fn new(authentication_service: Arc<AuthenticationService>) -> Self {
    Self {
      authentication_service,
    }
  }

  /// Executes the authentication use case
  ///
  /// # Returns
  /// The authentication outcome; denial is not an error
  ///
  /// # Errors
  /// Returns `IdentityError::Validation` if the tenant id, username or password
  /// is missing
  pub async fn execute(
    &self,
    command: AuthenticateUserCommand,
  ) -> Result<AuthenticationResult, IdentityError> {
    let tenant_id = TenantId::new(&command.tenant_id)?;

    self
      .authentication_service
      .authenticate(&tenant_id, &command.username, &command.password)
      .await
  }
}
