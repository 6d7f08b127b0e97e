//! Identity use cases
//!
//! This module contains the tenant-scoped authentication and registration
//! invitation workflows that orchestrate domain entities and services.

mod authenticate_user;
mod list_invitations;
mod offer_invitation;
mod redefine_invitation;
mod register_user;

#[cfg(test)]
mod test_support;

pub use authenticate_user::{AuthenticateUserCommand, AuthenticateUserUseCase};
pub use list_invitations::{ListInvitationsResponse, ListInvitationsUseCase};
pub use offer_invitation::{OfferInvitationCommand, OfferInvitationUseCase};
pub use redefine_invitation::{RedefineInvitationCommand, RedefineInvitationUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};

use chrono::{DateTime, Utc};

use crate::domain::identity::entities::Tenant;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::invitation::Invitation;
use crate::domain::identity::ports::TenantRepository;
use crate::domain::identity::value_objects::TenantId;

/// Parses `raw_tenant_id` and loads the tenant, failing if it does not exist
async fn load_tenant(
  tenant_repo: &dyn TenantRepository,
  raw_tenant_id: &str,
) -> Result<Tenant, IdentityError> {
  let tenant_id = TenantId::new(raw_tenant_id)?;
  tenant_repo
    .tenant_of_id(&tenant_id)
    .await?
    .ok_or(IdentityError::TenantNotFound)
}

/// Narrows an open-ended invitation to the requested window
///
/// With only a start date the invitation keeps its provisional one-day
/// window; an end date without a start date is rejected by the invitation.
fn apply_window(
  invitation: &mut Invitation,
  starting_on: Option<DateTime<Utc>>,
  until: Option<DateTime<Utc>>,
) -> Result<(), IdentityError> {
  if let Some(starting_on) = starting_on {
    invitation.will_start_on(starting_on)?;
  }
  if let Some(until) = until {
    invitation.lasting_until(until)?;
  }
  Ok(())
}
