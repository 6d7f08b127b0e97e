use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{apply_window, load_tenant};
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::TenantRepository;
use crate::domain::identity::value_objects::InvitationDescriptor;

/// Command for replacing an invitation's validity window
///
/// Leaving both bounds empty makes the invitation open-ended.
#[derive(Debug, Clone)]
pub struct RedefineInvitationCommand {
  pub tenant_id: String,
  /// Invitation id or description
  pub invitation_identifier: String,
  pub starting_on: Option<DateTime<Utc>>,
  pub until: Option<DateTime<Utc>>,
}

/// Use case for redefining a registration invitation
pub struct RedefineInvitationUseCase {
  tenant_repo: Arc<dyn TenantRepository>,
}

impl RedefineInvitationUseCase {
  pub fn new(tenant_repo: Arc<dyn TenantRepository>) -> Self {
    Self { tenant_repo }
  }

  pub async fn execute(
    &self,
    command: RedefineInvitationCommand,
  ) -> Result<InvitationDescriptor, IdentityError> {
    let mut tenant = load_tenant(self.tenant_repo.as_ref(), &command.tenant_id).await?;

    let invitation = tenant.redefine_registration_invitation_as(&command.invitation_identifier)?;
    apply_window(invitation, command.starting_on, command.until)?;
    let descriptor = invitation.to_descriptor();

    self.tenant_repo.save(tenant).await?;

    tracing::info!(
      tenant_id = %descriptor.tenant_id,
      invitation_id = %descriptor.invitation_id,
      open_ended = descriptor.is_open_ended(),
      "Registration invitation redefined"
    );

    Ok(descriptor)
  }
}
