use async_trait::async_trait;

use super::entities::{Tenant, User};
use super::errors::IdentityError;
use super::value_objects::{EncryptedPassword, PlainPassword, TenantId};

/// Repository trait for tenant persistence operations
#[async_trait]
pub trait TenantRepository: Send + Sync {
  /// Finds a tenant, including its invitations, by identifier
  async fn tenant_of_id(&self, tenant_id: &TenantId) -> Result<Option<Tenant>, IdentityError>;

  /// Inserts or replaces a tenant
  async fn save(&self, tenant: Tenant) -> Result<(), IdentityError>;
}

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Adds a new user; fails with a duplicate key error if the username is taken
  /// within the tenant
  async fn add(&self, user: User) -> Result<(), IdentityError>;

  /// Finds a user by username within a tenant
  async fn user_with_username(
    &self,
    tenant_id: &TenantId,
    username: &str,
  ) -> Result<Option<User>, IdentityError>;

  /// Finds the user whose stored credential equals `encrypted_password`
  ///
  /// Credential comparison happens here; callers never compare plaintext.
  async fn user_from_authentic_credentials(
    &self,
    tenant_id: &TenantId,
    username: &str,
    encrypted_password: &EncryptedPassword,
  ) -> Result<Option<User>, IdentityError>;
}

/// Service trait for one-way password encryption
///
/// Implementations must be deterministic: equal plaintexts yield equal
/// ciphertexts so credentials can be matched by equality.
#[async_trait]
pub trait EncryptionService: Send + Sync {
  async fn encrypted_value(
    &self,
    plaintext: &PlainPassword,
  ) -> Result<EncryptedPassword, IdentityError>;
}
