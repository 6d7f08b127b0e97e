//! Walks through offering an invitation, registering through it and
//! authenticating against in-memory repositories
//!
//! Run with: cargo run --example authenticate
//!
//! To switch the encryption adapter:
//! ```bash
//! IDENTITY_SECURITY__ENCRYPTION_ALGORITHM=argon2id cargo run --example authenticate
//! ```

use std::sync::Arc;

use identity_access::{
  application::identity::{
    AuthenticateUserCommand, AuthenticateUserUseCase, ListInvitationsUseCase,
    OfferInvitationCommand, OfferInvitationUseCase, RegisterUserCommand, RegisterUserUseCase,
  },
  domain::identity::{AuthenticationService, Tenant, TenantId, TenantRepository},
  infrastructure::{
    clock::SystemClock,
    config::Config,
    persistence::memory::{InMemoryTenantRepository, InMemoryUserRepository},
    security::encryption_service,
    telemetry::init_tracing,
  },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = Config::load()?;
  init_tracing(&config.logging)?;

  let tenants = Arc::new(InMemoryTenantRepository::new());
  let users = Arc::new(InMemoryUserRepository::new());
  let encryption = encryption_service(&config.security)?;
  let clock = Arc::new(SystemClock);

  let tenant_id = TenantId::generate();
  tenants
    .save(Tenant::new(tenant_id.clone(), "Acme", None, true)?)
    .await?;

  let invitation = OfferInvitationUseCase::new(tenants.clone())
    .execute(OfferInvitationCommand {
      tenant_id: tenant_id.to_string(),
      description: "Launch cohort".to_string(),
      starting_on: None,
      until: None,
    })
    .await?;
  println!("Offered: {}", serde_json::to_string_pretty(&invitation)?);

  let listed = ListInvitationsUseCase::new(tenants.clone(), clock.clone())
    .execute(tenant_id.as_str())
    .await?;
  println!("Available invitations: {}", listed.available.len());

  RegisterUserUseCase::new(tenants.clone(), users.clone(), encryption.clone(), clock)
    .execute(RegisterUserCommand {
      tenant_id: tenant_id.to_string(),
      invitation_identifier: invitation.invitation_id.clone(),
      username: "alice".to_string(),
      password: "correct-pw".to_string(),
      email_address: "alice@example.com".to_string(),
    })
    .await?;

  let authenticate = AuthenticateUserUseCase::new(Arc::new(AuthenticationService::new(
    tenants, users, encryption,
  )));

  for password in ["correct-pw", "wrong-pw"] {
    let result = authenticate
      .execute(AuthenticateUserCommand {
        tenant_id: tenant_id.to_string(),
        username: "alice".to_string(),
        password: password.to_string(),
      })
      .await?;

    match result.descriptor() {
      Some(user) => println!("Authenticated: {}", serde_json::to_string(user)?),
      None => println!("Not authenticated"),
    }
  }

  Ok(())
}
