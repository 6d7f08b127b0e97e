use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{IdentityError, ValidationError};
use super::invitation::Invitation;
use super::value_objects::{
  EmailAddress, EncryptedPassword, InvitationDescriptor, TenantId, UserDescriptor, required_text,
};

/// Tenant entity: an isolated organization owning users and invitations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
  /// Unique identifier of the tenant
  pub tenant_id: TenantId,
  /// Display name
  pub name: String,
  /// Optional free-form description
  pub description: Option<String>,
  /// Inactive tenants cannot authenticate users or manage invitations
  active: bool,
  registration_invitations: Vec<Invitation>,
}

impl Tenant {
  /// Creates a tenant with no invitations
  pub fn new(
    tenant_id: TenantId,
    name: &str,
    description: Option<String>,
    active: bool,
  ) -> Result<Self, ValidationError> {
    Ok(Self {
      tenant_id,
      name: required_text(name, "name")?,
      description,
      active,
      registration_invitations: Vec::new(),
    })
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn activate(&mut self) {
    self.active = true;
  }

  pub fn deactivate(&mut self) {
    self.active = false;
  }

  /// Offers a new open-ended registration invitation
  ///
  /// # Errors
  /// Returns `IdentityError::TenantInactive` for an inactive tenant and
  /// `IdentityError::DuplicateInvitation` if `description` already identifies
  /// an invitation
  pub fn offer_registration_invitation(
    &mut self,
    description: &str,
  ) -> Result<&mut Invitation, IdentityError> {
    self.ensure_active()?;
    // Kept verbatim; it is matched exactly as an invitation identifier
    required_text(description, "description")?;
    let description = description.to_string();

    if self.invitation(&description).is_some() {
      return Err(IdentityError::DuplicateInvitation(description));
    }

    let invitation_id = Uuid::new_v4().to_string().to_uppercase();
    let invitation = Invitation::new(self.tenant_id.clone(), &invitation_id, Some(description))?;

    tracing::info!(
      tenant_id = %self.tenant_id,
      invitation_id = %invitation_id,
      "Registration invitation offered"
    );

    self.registration_invitations.push(invitation);
    let last = self.registration_invitations.len() - 1;
    Ok(&mut self.registration_invitations[last])
  }

  /// True when the identified invitation exists and is available at `now`
  pub fn is_registration_available_through(&self, identifier: &str, now: DateTime<Utc>) -> bool {
    self.active
      && self
        .invitation(identifier)
        .is_some_and(|invitation| invitation.is_available(now))
  }

  /// Clears the identified invitation's window and returns it for redefinition
  pub fn redefine_registration_invitation_as(
    &mut self,
    identifier: &str,
  ) -> Result<&mut Invitation, IdentityError> {
    self.ensure_active()?;
    let invitation = self
      .registration_invitations
      .iter_mut()
      .find(|invitation| invitation.is_identified_by(identifier))
      .ok_or(IdentityError::InvitationNotFound)?;

    Ok(invitation.redefine_as())
  }

  /// Removes the identified invitation; returns whether one was removed
  pub fn withdraw_invitation(&mut self, identifier: &str) -> Result<bool, IdentityError> {
    self.ensure_active()?;
    let before = self.registration_invitations.len();
    self
      .registration_invitations
      .retain(|invitation| !invitation.is_identified_by(identifier));

    let withdrawn = self.registration_invitations.len() != before;
    if withdrawn {
      tracing::info!(tenant_id = %self.tenant_id, identifier, "Registration invitation withdrawn");
    }
    Ok(withdrawn)
  }

  pub fn all_available_registration_invitations(
    &self,
    now: DateTime<Utc>,
  ) -> Result<Vec<InvitationDescriptor>, IdentityError> {
    self.invitation_descriptors(|invitation| invitation.is_available(now))
  }

  pub fn all_unavailable_registration_invitations(
    &self,
    now: DateTime<Utc>,
  ) -> Result<Vec<InvitationDescriptor>, IdentityError> {
    self.invitation_descriptors(|invitation| !invitation.is_available(now))
  }

  /// Registers a user through an invitation available at `now`
  ///
  /// # Errors
  /// Returns `IdentityError::InvitationUnavailable` if the invitation is
  /// missing or outside its window
  pub fn register_user(
    &self,
    invitation_identifier: &str,
    username: &str,
    password: EncryptedPassword,
    email_address: &str,
    now: DateTime<Utc>,
  ) -> Result<User, IdentityError> {
    self.ensure_active()?;

    if !self.is_registration_available_through(invitation_identifier, now) {
      tracing::warn!(
        tenant_id = %self.tenant_id,
        invitation_identifier,
        "Registration attempted through unavailable invitation"
      );
      return Err(IdentityError::InvitationUnavailable);
    }

    Ok(User::new(
      self.tenant_id.clone(),
      username,
      password,
      email_address,
    )?)
  }

  pub fn invitation(&self, identifier: &str) -> Option<&Invitation> {
    self
      .registration_invitations
      .iter()
      .find(|invitation| invitation.is_identified_by(identifier))
  }

  pub fn registration_invitations(&self) -> &[Invitation] {
    &self.registration_invitations
  }

  fn invitation_descriptors(
    &self,
    filter: impl Fn(&Invitation) -> bool,
  ) -> Result<Vec<InvitationDescriptor>, IdentityError> {
    self.ensure_active()?;
    Ok(
      self
        .registration_invitations
        .iter()
        .filter(|invitation| filter(invitation))
        .map(Invitation::to_descriptor)
        .collect(),
    )
  }

  fn ensure_active(&self) -> Result<(), IdentityError> {
    if !self.active {
      return Err(IdentityError::TenantInactive);
    }
    Ok(())
  }
}

/// User entity belonging to exactly one tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub tenant_id: TenantId,
  pub username: String,
  /// Output of the configured encryption service, never the plaintext
  pub password: EncryptedPassword,
  pub email_address: EmailAddress,
  pub enabled: bool,
}

impl User {
  /// Creates an enabled user
  pub fn new(
    tenant_id: TenantId,
    username: &str,
    password: EncryptedPassword,
    email_address: &str,
  ) -> Result<Self, ValidationError> {
    Ok(Self {
      tenant_id,
      username: required_text(username, "username")?,
      password,
      email_address: EmailAddress::new(email_address)?,
      enabled: true,
    })
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn enable(&mut self) {
    self.enabled = true;
  }

  pub fn disable(&mut self) {
    self.enabled = false;
  }

  /// Replaces the stored credential
  pub fn change_password(&mut self, password: EncryptedPassword) {
    self.password = password;
  }

  pub fn user_descriptor(&self) -> UserDescriptor {
    UserDescriptor::new(
      self.tenant_id.clone(),
      self.username.clone(),
      self.email_address.as_str().to_string(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
  }

  fn active_tenant() -> Tenant {
    Tenant::new(TenantId::new("T1").unwrap(), "Acme", None, true).unwrap()
  }

  fn password() -> EncryptedPassword {
    EncryptedPassword::new("0f1e2d").unwrap()
  }

  #[test]
  fn test_tenant_requires_name() {
    assert!(Tenant::new(TenantId::new("T1").unwrap(), " ", None, true).is_err());
  }

  #[test]
  fn test_tenant_activation() {
    let mut tenant = active_tenant();
    tenant.deactivate();
    assert!(!tenant.is_active());
    tenant.activate();
    assert!(tenant.is_active());
  }

  #[test]
  fn test_offer_invitation_is_open_ended_with_generated_id() {
    let mut tenant = active_tenant();
    let invitation = tenant.offer_registration_invitation("Spring cohort").unwrap();

    let id = invitation.invitation_id().to_string();
    assert_eq!(id, id.to_uppercase());
    assert_eq!(invitation.description(), Some("Spring cohort"));
    assert!(invitation.starting_on().is_none());
    assert!(tenant.is_registration_available_through(&id, day(1)));
    assert!(tenant.is_registration_available_through("Spring cohort", day(1)));
  }

  #[test]
  fn test_offer_invitation_rejects_duplicate_description() {
    let mut tenant = active_tenant();
    tenant.offer_registration_invitation("Spring cohort").unwrap();

    assert!(matches!(
      tenant.offer_registration_invitation("Spring cohort"),
      Err(IdentityError::DuplicateInvitation(_))
    ));
  }

  #[test]
  fn test_offered_description_is_kept_verbatim() {
    let mut tenant = active_tenant();
    let id = tenant
      .offer_registration_invitation(" Spring cohort ")
      .unwrap()
      .invitation_id()
      .to_string();

    assert!(tenant.is_registration_available_through(" Spring cohort ", day(1)));
    assert!(!tenant.is_registration_available_through("Spring cohort", day(1)));
    assert!(tenant.is_registration_available_through(&id, day(1)));
    assert!(matches!(
      tenant.offer_registration_invitation("   "),
      Err(IdentityError::Validation(ValidationError::MissingField { .. }))
    ));
  }

  #[test]
  fn test_inactive_tenant_cannot_offer_invitations() {
    let mut tenant = active_tenant();
    tenant.deactivate();

    assert!(matches!(
      tenant.offer_registration_invitation("Spring cohort"),
      Err(IdentityError::TenantInactive)
    ));
  }

  #[test]
  fn test_redefine_invitation_window() {
    let mut tenant = active_tenant();
    tenant.offer_registration_invitation("Spring cohort").unwrap();

    tenant
      .redefine_registration_invitation_as("Spring cohort")
      .unwrap()
      .will_start_on(day(10))
      .unwrap()
      .lasting_until(day(20))
      .unwrap();

    assert!(!tenant.is_registration_available_through("Spring cohort", day(9)));
    assert!(tenant.is_registration_available_through("Spring cohort", day(10)));
    assert!(tenant.is_registration_available_through("Spring cohort", day(20)));
    assert!(!tenant.is_registration_available_through("Spring cohort", day(21)));
  }

  #[test]
  fn test_redefine_unknown_invitation_fails() {
    let mut tenant = active_tenant();

    assert!(matches!(
      tenant.redefine_registration_invitation_as("missing"),
      Err(IdentityError::InvitationNotFound)
    ));
  }

  #[test]
  fn test_available_and_unavailable_partitions() {
    let mut tenant = active_tenant();
    tenant.offer_registration_invitation("open").unwrap();
    tenant
      .offer_registration_invitation("windowed")
      .unwrap()
      .will_start_on(day(10))
      .unwrap()
      .lasting_until(day(12))
      .unwrap();

    let available = tenant.all_available_registration_invitations(day(1)).unwrap();
    let unavailable = tenant
      .all_unavailable_registration_invitations(day(1))
      .unwrap();

    assert_eq!(available.len(), 1);
    assert_eq!(available[0].description.as_deref(), Some("open"));
    assert_eq!(unavailable.len(), 1);
    assert_eq!(unavailable[0].description.as_deref(), Some("windowed"));

    let available = tenant
      .all_available_registration_invitations(day(11))
      .unwrap();
    assert_eq!(available.len(), 2);
  }

  #[test]
  fn test_withdraw_invitation() {
    let mut tenant = active_tenant();
    tenant.offer_registration_invitation("Spring cohort").unwrap();

    assert!(tenant.withdraw_invitation("Spring cohort").unwrap());
    assert!(!tenant.withdraw_invitation("Spring cohort").unwrap());
    assert!(tenant.invitation("Spring cohort").is_none());
  }

  #[test]
  fn test_register_user_through_available_invitation() {
    let mut tenant = active_tenant();
    tenant.offer_registration_invitation("Spring cohort").unwrap();

    let user = tenant
      .register_user(
        "Spring cohort",
        "alice",
        password(),
        "Alice@Example.com",
        day(1),
      )
      .unwrap();

    assert_eq!(user.tenant_id, tenant.tenant_id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email_address.as_str(), "alice@example.com");
    assert!(user.is_enabled());
  }

  #[test]
  fn test_register_user_rejects_unavailable_invitation() {
    let mut tenant = active_tenant();
    tenant
      .offer_registration_invitation("Spring cohort")
      .unwrap()
      .will_start_on(day(10))
      .unwrap();

    assert!(matches!(
      tenant.register_user("Spring cohort", "alice", password(), "a@example.com", day(1)),
      Err(IdentityError::InvitationUnavailable)
    ));
    assert!(matches!(
      tenant.register_user("unknown", "alice", password(), "a@example.com", day(10)),
      Err(IdentityError::InvitationUnavailable)
    ));
  }

  #[test]
  fn test_user_validation() {
    let tenant_id = TenantId::new("T1").unwrap();

    assert!(User::new(tenant_id.clone(), "", password(), "a@example.com").is_err());
    assert_eq!(
      User::new(tenant_id, "alice", password(), "not-an-email").unwrap_err(),
      ValidationError::InvalidField {
        field: "email_address".to_string()
      }
    );
  }

  #[test]
  fn test_user_enablement_and_descriptor() {
    let mut user = User::new(
      TenantId::new("T1").unwrap(),
      "alice",
      password(),
      "alice@example.com",
    )
    .unwrap();

    user.disable();
    assert!(!user.is_enabled());
    user.enable();
    assert!(user.is_enabled());

    let descriptor = user.user_descriptor();
    assert_eq!(descriptor.username(), "alice");
    assert_eq!(descriptor.tenant_id().as_str(), "T1");
    assert_eq!(descriptor.email_address(), "alice@example.com");
  }

  #[test]
  fn test_change_password() {
    let mut user = User::new(
      TenantId::new("T1").unwrap(),
      "alice",
      password(),
      "alice@example.com",
    )
    .unwrap();

    user.change_password(EncryptedPassword::new("a1b2c3").unwrap());
    assert_eq!(user.password.as_str(), "a1b2c3");
  }
}
