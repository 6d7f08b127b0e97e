use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::identity::entities::Tenant;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::TenantRepository;
use crate::domain::identity::value_objects::TenantId;

/// Tenant repository keeping aggregates in a map keyed by tenant id
#[derive(Default)]
pub struct InMemoryTenantRepository {
  tenants: RwLock<HashMap<TenantId, Tenant>>,
}

impl InMemoryTenantRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl TenantRepository for InMemoryTenantRepository {
  async fn tenant_of_id(&self, tenant_id: &TenantId) -> Result<Option<Tenant>, IdentityError> {
    Ok(self.tenants.read().await.get(tenant_id).cloned())
  }

  async fn save(&self, tenant: Tenant) -> Result<(), IdentityError> {
    tracing::debug!(tenant_id = %tenant.tenant_id, "Saving tenant");
    self
      .tenants
      .write()
      .await
      .insert(tenant.tenant_id.clone(), tenant);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tenant(id: &str) -> Tenant {
    Tenant::new(TenantId::new(id).unwrap(), "Acme", None, true).unwrap()
  }

  #[tokio::test]
  async fn test_save_and_find() {
    let repo = InMemoryTenantRepository::new();
    repo.save(tenant("T1")).await.unwrap();

    let found = repo
      .tenant_of_id(&TenantId::new("T1").unwrap())
      .await
      .unwrap();
    assert_eq!(found.unwrap().name, "Acme");

    let missing = repo
      .tenant_of_id(&TenantId::new("T2").unwrap())
      .await
      .unwrap();
    assert!(missing.is_none());
  }

  #[tokio::test]
  async fn test_save_replaces_existing_tenant() {
    let repo = InMemoryTenantRepository::new();
    let mut acme = tenant("T1");
    repo.save(acme.clone()).await.unwrap();

    acme.deactivate();
    repo.save(acme).await.unwrap();

    let found = repo
      .tenant_of_id(&TenantId::new("T1").unwrap())
      .await
      .unwrap()
      .unwrap();
    assert!(!found.is_active());
  }
}
