use std::sync::Arc;

use super::load_tenant;
use crate::domain::common::Clock;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::TenantRepository;
use crate::domain::identity::value_objects::InvitationDescriptor;

/// Invitations of a tenant partitioned by availability at the clock's instant
#[derive(Debug, Clone)]
pub struct ListInvitationsResponse {
  pub available: Vec<InvitationDescriptor>,
  pub unavailable: Vec<InvitationDescriptor>,
}

/// Use case for listing a tenant's registration invitations
pub struct ListInvitationsUseCase {
  tenant_repo: Arc<dyn TenantRepository>,
  clock: Arc<dyn Clock>,
}

impl ListInvitationsUseCase {
  pub fn new(tenant_repo: Arc<dyn TenantRepository>, clock: Arc<dyn Clock>) -> Self {
    Self { tenant_repo, clock }
  }

  pub async fn execute(&self, tenant_id: &str) -> Result<ListInvitationsResponse, IdentityError> {
    let tenant = load_tenant(self.tenant_repo.as_ref(), tenant_id).await?;
    let now = self.clock.now();

    Ok(ListInvitationsResponse {
      available: tenant.all_available_registration_invitations(now)?,
      unavailable: tenant.all_unavailable_registration_invitations(now)?,
    })
  }
}
