use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::identity::entities::{Tenant, User};
use crate::domain::identity::ports::{EncryptionService, TenantRepository, UserRepository};
use crate::domain::identity::value_objects::{PlainPassword, TenantId};
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::persistence::memory::{InMemoryTenantRepository, InMemoryUserRepository};
use crate::infrastructure::security::Sha256EncryptionService;

pub(super) const TENANT: &str = "T1";

pub(super) fn day(d: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 7, d, 0, 0, 0).unwrap()
}

pub(super) struct Fixture {
  pub tenants: Arc<InMemoryTenantRepository>,
  pub users: Arc<InMemoryUserRepository>,
  pub encryption: Arc<Sha256EncryptionService>,
}

impl Fixture {
  /// Seeds an active tenant `T1` with no users
  pub async fn new() -> Self {
    let fixture = Self {
      tenants: Arc::new(InMemoryTenantRepository::new()),
      users: Arc::new(InMemoryUserRepository::new()),
      encryption: Arc::new(Sha256EncryptionService::new("test-salt")),
    };

    let tenant = Tenant::new(TenantId::new(TENANT).unwrap(), "Acme", None, true).unwrap();
    fixture.tenants.save(tenant).await.unwrap();
    fixture
  }

  pub fn clock(&self, d: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::at(day(d)))
  }

  pub async fn tenant(&self) -> Tenant {
    self
      .tenants
      .tenant_of_id(&TenantId::new(TENANT).unwrap())
      .await
      .unwrap()
      .unwrap()
  }

  /// Stores an enabled user whose password is encrypted with the fixture's service
  pub async fn add_user(&self, username: &str, password: &str) -> User {
    let encrypted = self
      .encryption
      .encrypted_value(&PlainPassword::new(password).unwrap())
      .await
      .unwrap();
    let user = User::new(
      TenantId::new(TENANT).unwrap(),
      username,
      encrypted,
      &format!("{}@example.com", username),
    )
    .unwrap();
    self.users.add(user.clone()).await.unwrap();
    user
  }
}
