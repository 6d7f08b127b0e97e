use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::identity::entities::User;
use crate::domain::identity::errors::{IdentityError, RepositoryError};
use crate::domain::identity::ports::UserRepository;
use crate::domain::identity::value_objects::{EncryptedPassword, TenantId};

/// User repository keyed by (tenant id, username)
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<(TenantId, String), User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces a stored user, e.g. after enabling or disabling it
  pub async fn update(&self, user: User) -> Result<(), IdentityError> {
    let mut users = self.users.write().await;
    let key = (user.tenant_id.clone(), user.username.clone());
    match users.get_mut(&key) {
      Some(stored) => {
        *stored = user;
        Ok(())
      }
      None => Err(RepositoryError::NotFound.into()),
    }
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn add(&self, user: User) -> Result<(), IdentityError> {
    let mut users = self.users.write().await;
    let key = (user.tenant_id.clone(), user.username.clone());

    if users.contains_key(&key) {
      return Err(RepositoryError::DuplicateKey(format!("{}/{}", key.0, key.1)).into());
    }

    users.insert(key, user);
    Ok(())
  }

  async fn user_with_username(
    &self,
    tenant_id: &TenantId,
    username: &str,
  ) -> Result<Option<User>, IdentityError> {
    let key = (tenant_id.clone(), username.to_string());
    Ok(self.users.read().await.get(&key).cloned())
  }

  async fn user_from_authentic_credentials(
    &self,
    tenant_id: &TenantId,
    username: &str,
    encrypted_password: &EncryptedPassword,
  ) -> Result<Option<User>, IdentityError> {
    let user = self.user_with_username(tenant_id, username).await?;
    Ok(user.filter(|user| &user.password == encrypted_password))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tenant_id() -> TenantId {
    TenantId::new("T1").unwrap()
  }

  fn user(username: &str, password: &str) -> User {
    User::new(
      tenant_id(),
      username,
      EncryptedPassword::new(password).unwrap(),
      "someone@example.com",
    )
    .unwrap()
  }

  #[tokio::test]
  async fn test_add_rejects_duplicate_username() {
    let repo = InMemoryUserRepository::new();
    repo.add(user("alice", "c1")).await.unwrap();

    assert!(matches!(
      repo.add(user("alice", "c2")).await,
      Err(IdentityError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }

  #[tokio::test]
  async fn test_same_username_in_other_tenant_is_allowed() {
    let repo = InMemoryUserRepository::new();
    repo.add(user("alice", "c1")).await.unwrap();

    let other = User::new(
      TenantId::new("T2").unwrap(),
      "alice",
      EncryptedPassword::new("c1").unwrap(),
      "alice@example.com",
    )
    .unwrap();
    assert!(repo.add(other).await.is_ok());
  }

  #[tokio::test]
  async fn test_authentic_credentials_require_matching_ciphertext() {
    let repo = InMemoryUserRepository::new();
    repo.add(user("alice", "c1")).await.unwrap();

    let matching = EncryptedPassword::new("c1").unwrap();
    let wrong = EncryptedPassword::new("c2").unwrap();

    assert!(
      repo
        .user_from_authentic_credentials(&tenant_id(), "alice", &matching)
        .await
        .unwrap()
        .is_some()
    );
    assert!(
      repo
        .user_from_authentic_credentials(&tenant_id(), "alice", &wrong)
        .await
        .unwrap()
        .is_none()
    );
    assert!(
      repo
        .user_from_authentic_credentials(&tenant_id(), "bob", &matching)
        .await
        .unwrap()
        .is_none()
    );
  }

  #[tokio::test]
  async fn test_update_replaces_stored_user() {
    let repo = InMemoryUserRepository::new();
    let mut alice = user("alice", "c1");
    repo.add(alice.clone()).await.unwrap();

    alice.disable();
    repo.update(alice).await.unwrap();

    let stored = repo
      .user_with_username(&tenant_id(), "alice")
      .await
      .unwrap()
      .unwrap();
    assert!(!stored.is_enabled());

    assert!(matches!(
      repo.update(user("bob", "c1")).await,
      Err(IdentityError::Repository(RepositoryError::NotFound))
    ));
  }
}
