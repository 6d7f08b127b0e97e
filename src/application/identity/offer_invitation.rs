use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{apply_window, load_tenant};
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::TenantRepository;
use crate::domain::identity::value_objects::InvitationDescriptor;

/// Command for offering a registration invitation
#[derive(Debug, Clone)]
pub struct OfferInvitationCommand {
  pub tenant_id: String,
  /// Human-readable description, usable as an alternate identifier
  pub description: String,
  /// Optional start of the validity window
  pub starting_on: Option<DateTime<Utc>>,
  /// Optional end of the validity window; requires `starting_on`
  pub until: Option<DateTime<Utc>>,
}

/// Use case for offering a registration invitation on behalf of a tenant
pub struct OfferInvitationUseCase {
  tenant_repo: Arc<dyn TenantRepository>,
}

impl OfferInvitationUseCase {
  pub fn new(tenant_repo: Arc<dyn TenantRepository>) -> Self {
    Self { tenant_repo }
  }

  /// Offers the invitation and persists the tenant
  ///
  /// # Errors
  /// Returns `IdentityError::TenantNotFound` for an unknown tenant,
  /// `IdentityError::TenantInactive` for an inactive one, and window errors
  /// from the invitation itself
  pub async fn execute(
    &self,
    command: OfferInvitationCommand,
  ) -> Result<InvitationDescriptor, IdentityError> {
    let mut tenant = load_tenant(self.tenant_repo.as_ref(), &command.tenant_id).await?;

    let invitation = tenant.offer_registration_invitation(&command.description)?;
    apply_window(invitation, command.starting_on, command.until)?;
    let descriptor = invitation.to_descriptor();

    self.tenant_repo.save(tenant).await?;

    Ok(descriptor)
  }
}
